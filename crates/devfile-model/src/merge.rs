//! Field-wise overlay of variant payloads

/// Overlay of a partially filled value onto a complete one of the same shape.
///
/// Fields set on `patch` win, unset fields keep the value from `self`.
/// A decoded `null` counts as unset, so a patch never clears a field.
/// Collections are replaced wholesale, never concatenated.
pub trait Merge: Sized {
    /// Overlay `patch` onto `self`
    #[must_use]
    fn merge(self, patch: Self) -> Self;
}

/// Implements [`Merge`] for a struct whose fields are all `Option`s.
macro_rules! merge_fields {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::merge::Merge for $ty {
            #[inline]
            fn merge(self, patch: Self) -> Self {
                Self {
                    $($field: patch.$field.or(self.$field),)+
                }
            }
        }
    };
}

pub(crate) use merge_fields;
