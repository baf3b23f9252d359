// Allocator plumbing for the underlying table.
//
// hashbrown only knows about `allocator_api2::alloc::Allocator`. With the
// `allocator-api2` feature on, that trait is ours as well and `AllocWrapper`
// is a plain forwarder. With it off, we define a minimal crate-private trait
// so that the rest of the crate can stay generic over `A` either way, and
// only `Global` can ever be plugged in.

pub use self::inner::Global;
pub(crate) use self::inner::{AllocWrapper, Allocator, global_alloc};

#[cfg(feature = "allocator-api2")]
mod inner {
    use allocator_api2::alloc::AllocError;
    pub use allocator_api2::alloc::{Allocator, Global, Layout};
    use core::ptr::NonNull;

    #[inline]
    pub(crate) fn global_alloc() -> Global {
        Global
    }

    /// Forwards to the wrapped allocator.
    #[derive(Clone, Copy, Debug, Default)]
    pub(crate) struct AllocWrapper<T>(pub(crate) T);

    // SAFETY: every method forwards to `T`, which upholds the trait contract.
    unsafe impl<T: Allocator> allocator_api2::alloc::Allocator
        for AllocWrapper<T>
    {
        #[inline]
        fn allocate(
            &self,
            layout: Layout,
        ) -> Result<NonNull<[u8]>, AllocError> {
            allocator_api2::alloc::Allocator::allocate(&self.0, layout)
        }

        #[inline]
        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            // SAFETY: the caller upholds the contract for `self`, and `self`
            // allocates exclusively through `self.0`.
            unsafe {
                allocator_api2::alloc::Allocator::deallocate(
                    &self.0, ptr, layout,
                )
            }
        }
    }
}

#[cfg(not(feature = "allocator-api2"))]
mod inner {
    use crate::alloc::alloc::Layout;
    use allocator_api2::alloc::AllocError;
    use core::ptr::NonNull;

    #[inline]
    pub(crate) fn global_alloc() -> Global {
        Global::default()
    }

    #[allow(clippy::missing_safety_doc)] // crate-private
    pub unsafe trait Allocator {
        fn allocate(&self, layout: Layout)
        -> Result<NonNull<[u8]>, AllocError>;
        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
    }

    /// The global memory allocator.
    #[derive(Clone, Copy, Debug, Default)]
    #[doc(hidden)]
    pub struct Global(allocator_api2::alloc::Global);

    // SAFETY: forwards to allocator_api2's Global.
    unsafe impl Allocator for Global {
        #[inline]
        fn allocate(
            &self,
            layout: Layout,
        ) -> Result<NonNull<[u8]>, AllocError> {
            allocator_api2::alloc::Allocator::allocate(&self.0, layout)
        }

        #[inline]
        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            // SAFETY: the caller upholds the contract for `self`.
            unsafe {
                allocator_api2::alloc::Allocator::deallocate(
                    &self.0, ptr, layout,
                )
            }
        }
    }

    /// Adapts the crate-private `Allocator` to the one hashbrown expects.
    #[derive(Clone, Copy, Debug, Default)]
    pub(crate) struct AllocWrapper<T>(pub(crate) T);

    // SAFETY: every method forwards to `T`, which upholds the trait contract.
    unsafe impl<T: Allocator> allocator_api2::alloc::Allocator
        for AllocWrapper<T>
    {
        #[inline]
        fn allocate(
            &self,
            layout: Layout,
        ) -> Result<NonNull<[u8]>, AllocError> {
            Allocator::allocate(&self.0, layout)
        }

        #[inline]
        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            // SAFETY: the caller upholds the contract for `self`.
            unsafe { Allocator::deallocate(&self.0, ptr, layout) }
        }
    }
}
