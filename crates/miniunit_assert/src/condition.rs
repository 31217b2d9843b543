//! Boolean conditions accepted by `is_true` / `is_false`.

/// A value or zero-argument predicate that evaluates to a boolean.
pub trait Condition {
    fn evaluate(self) -> bool;
}

impl Condition for bool {
    fn evaluate(self) -> bool {
        self
    }
}

impl<F> Condition for F
where
    F: FnOnce() -> bool,
{
    fn evaluate(self) -> bool {
        self()
    }
}
