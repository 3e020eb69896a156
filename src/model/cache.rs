//! Lazily computed, explicitly invalidated values.

/// A value that is either valid or must be recomputed before use.
///
/// Mutations of the owning state must go through [`Cached::update`] (which
/// only touches a valid value) or call [`Cached::invalidate`].
///
/// # Examples
///
/// ```
/// use u_localsearch::model::Cached;
///
/// let mut total: Cached<i64> = Cached::invalid();
/// assert_eq!(total.get(), None);
/// assert_eq!(total.get_or_compute(|| 10), 10);
/// assert!(total.update(|t| t + 5));
/// assert_eq!(total.get(), Some(15));
///
/// total.invalidate();
/// assert!(!total.update(|t| t + 5));
/// assert_eq!(total.get(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cached<T> {
    value: T,
    valid: bool,
}

impl<T: Copy + Default> Cached<T> {
    /// Creates an empty cache.
    pub fn invalid() -> Self {
        Self {
            value: T::default(),
            valid: false,
        }
    }
}

impl<T: Copy> Cached<T> {
    /// Creates a cache holding a valid value.
    pub fn valid(value: T) -> Self {
        Self { value, valid: true }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the value if valid.
    pub fn get(&self) -> Option<T> {
        self.valid.then_some(self.value)
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.valid = true;
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Returns the cached value, computing and storing it first if needed.
    pub fn get_or_compute<F: FnOnce() -> T>(&mut self, compute: F) -> T {
        if !self.valid {
            self.set(compute());
        }
        self.value
    }

    /// Applies an incremental update to a valid value.
    ///
    /// Returns `false` and leaves the cache invalid when there was nothing
    /// to update.
    pub fn update<F: FnOnce(T) -> T>(&mut self, f: F) -> bool {
        if self.valid {
            self.value = f(self.value);
        }
        self.valid
    }
}

impl<T: Copy + Default> Default for Cached<T> {
    fn default() -> Self {
        Self::invalid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_once() {
        let mut cache: Cached<u32> = Cached::invalid();
        let mut calls = 0;
        for _ in 0..3 {
            let v = cache.get_or_compute(|| {
                calls += 1;
                7
            });
            assert_eq!(v, 7);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let mut cache = Cached::valid(1u32);
        cache.invalidate();
        assert!(!cache.is_valid());
        assert_eq!(cache.get_or_compute(|| 2), 2);
    }

    #[test]
    fn test_update_requires_valid() {
        let mut cache: Cached<i32> = Cached::default();
        assert!(!cache.update(|v| v + 1));
        assert!(!cache.is_valid());

        cache.set(3);
        assert!(cache.update(|v| v * 2));
        assert_eq!(cache.get(), Some(6));
    }
}
