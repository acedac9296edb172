use std::fmt;

/// A list holding at least one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmpty<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmpty<T> {
    pub fn new(head: T) -> Self {
        Self {
            head,
            tail: Vec::new(),
        }
    }

    pub fn first(&self) -> &T {
        &self.head
    }

    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    pub fn push(&mut self, item: T) {
        self.tail.push(item);
    }

    pub fn append(&mut self, other: NonEmpty<T>) {
        self.tail.push(other.head);
        self.tail.extend(other.tail);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    pub fn into_vec(self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len());
        items.push(self.head);
        items.extend(self.tail);
        items
    }
}

impl<T> IntoIterator for NonEmpty<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<T: fmt::Display> fmt::Display for NonEmpty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// Outcome of a check that reports every defect it finds.
pub type Validated<T, E> = Result<T, NonEmpty<E>>;

pub fn invalid<T, E>(error: E) -> Validated<T, E> {
    Err(NonEmpty::new(error))
}

/// Combine two independent checks. Errors from both sides are kept.
pub fn zip<A, B, E>(a: Validated<A, E>, b: Validated<B, E>) -> Validated<(A, B), E> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(mut left), Err(right)) => {
            left.append(right);
            Err(left)
        }
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
    }
}

/// Run every check and gather all errors in input order.
///
/// Unlike `collect::<Result<Vec<_>, _>>()` this never stops at the first
/// failure: every item is inspected before the outcome is decided.
pub fn sequence<T, E, I>(items: I) -> Validated<Vec<T>, E>
where
    I: IntoIterator<Item = Validated<T, E>>,
{
    let mut values = Vec::new();
    let mut errors: Option<NonEmpty<E>> = None;

    for item in items {
        match item {
            Ok(value) => values.push(value),
            Err(e) => match errors.as_mut() {
                Some(acc) => acc.append(e),
                None => errors = Some(e),
            },
        }
    }

    match errors {
        Some(errors) => Err(errors),
        None => Ok(values),
    }
}
