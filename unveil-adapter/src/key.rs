#[cfg(feature = "std")]
pub trait SectionKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> SectionKey for T {}

#[cfg(not(feature = "std"))]
pub trait SectionKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> SectionKey for T {}
