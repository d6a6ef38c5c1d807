//! Left-to-right function application.
//!
//! [`Pipe`] is an extension trait: it only applies where it is imported,
//! and it adds a method rather than patching any existing type.

/// Feeds `value` through `steps` in order.
///
/// ```
/// use interpose_model::pipe;
///
/// let trim = |s: String| s.trim().to_string();
/// let upper = |s: String| s.to_uppercase();
/// let steps: [&dyn Fn(String) -> String; 2] = [&trim, &upper];
///
/// let shout = pipe("  dave ".to_string(), &steps);
/// assert_eq!(shout, "DAVE");
/// ```
pub fn pipe<T>(value: T, steps: &[&dyn Fn(T) -> T]) -> T {
    steps.iter().fold(value, |acc, step| step(acc))
}

/// `value.pipe(f)` is `f(value)`, so chains read in call order and may
/// change type at each step.
pub trait Pipe: Sized {
    fn pipe<R>(self, f: impl FnOnce(Self) -> R) -> R {
        f(self)
    }
}

impl<T> Pipe for T {}
