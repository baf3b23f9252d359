use crate::{
    CompoundKey,
    support::alloc::{AllocWrapper, Allocator, Global},
};
use core::iter::FusedIterator;
use hashbrown::hash_map;

/// An iterator over the entries of a [`CompoundKeyMap`] by shared reference,
/// yielding `(key_part_a, key_part_b, &value)`.
///
/// Created by [`CompoundKeyMap::iter`].
///
/// [`CompoundKeyMap`]: crate::CompoundKeyMap
/// [`CompoundKeyMap::iter`]: crate::CompoundKeyMap::iter
#[derive(Clone, Debug)]
pub struct Iter<'a, V> {
    inner: hash_map::Iter<'a, u64, V>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(inner: hash_map::Iter<'a, u64, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i32, i32, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (&key, value) = self.inner.next()?;
        let (a, b) = CompoundKey::from_raw(key).unpack();
        Some((a, b, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// hash_map::Iter is a FusedIterator, so Iter is as well.
impl<V> FusedIterator for Iter<'_, V> {}

/// An iterator over the entries of a [`CompoundKeyMap`] by mutable reference,
/// yielding `(key_part_a, key_part_b, &mut value)`.
///
/// Created by [`CompoundKeyMap::iter_mut`].
///
/// [`CompoundKeyMap`]: crate::CompoundKeyMap
/// [`CompoundKeyMap::iter_mut`]: crate::CompoundKeyMap::iter_mut
#[derive(Debug)]
pub struct IterMut<'a, V> {
    inner: hash_map::IterMut<'a, u64, V>,
}

impl<'a, V> IterMut<'a, V> {
    pub(crate) fn new(inner: hash_map::IterMut<'a, u64, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (i32, i32, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (&key, value) = self.inner.next()?;
        let (a, b) = CompoundKey::from_raw(key).unpack();
        Some((a, b, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for IterMut<'_, V> {}

/// An iterator over the key pairs of a [`CompoundKeyMap`], yielding
/// `(key_part_a, key_part_b)`.
///
/// Created by [`CompoundKeyMap::keys`].
///
/// [`CompoundKeyMap`]: crate::CompoundKeyMap
/// [`CompoundKeyMap::keys`]: crate::CompoundKeyMap::keys
#[derive(Clone, Debug)]
pub struct Keys<'a, V> {
    inner: hash_map::Keys<'a, u64, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(crate) fn new(inner: hash_map::Keys<'a, u64, V>) -> Self {
        Self { inner }
    }
}

impl<V> Iterator for Keys<'_, V> {
    type Item = (i32, i32);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&key| CompoundKey::from_raw(key).unpack())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Keys<'_, V> {}

/// An iterator over the values of a [`CompoundKeyMap`].
///
/// Created by [`CompoundKeyMap::values`].
///
/// [`CompoundKeyMap`]: crate::CompoundKeyMap
/// [`CompoundKeyMap::values`]: crate::CompoundKeyMap::values
#[derive(Clone, Debug)]
pub struct Values<'a, V> {
    inner: hash_map::Values<'a, u64, V>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(inner: hash_map::Values<'a, u64, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Values<'_, V> {}

/// An iterator over the values of a [`CompoundKeyMap`] by mutable reference.
///
/// Created by [`CompoundKeyMap::values_mut`].
///
/// [`CompoundKeyMap`]: crate::CompoundKeyMap
/// [`CompoundKeyMap::values_mut`]: crate::CompoundKeyMap::values_mut
#[derive(Debug)]
pub struct ValuesMut<'a, V> {
    inner: hash_map::ValuesMut<'a, u64, V>,
}

impl<'a, V> ValuesMut<'a, V> {
    pub(crate) fn new(inner: hash_map::ValuesMut<'a, u64, V>) -> Self {
        Self { inner }
    }
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for ValuesMut<'_, V> {}

/// An iterator over the entries of a [`CompoundKeyMap`] by ownership,
/// yielding `(key_part_a, key_part_b, value)`.
///
/// Created by [`CompoundKeyMap::into_iter`].
///
/// [`CompoundKeyMap`]: crate::CompoundKeyMap
/// [`CompoundKeyMap::into_iter`]: crate::CompoundKeyMap::into_iter
#[derive(Debug)]
pub struct IntoIter<V, A: Allocator = Global> {
    inner: hash_map::IntoIter<u64, V, AllocWrapper<A>>,
}

impl<V, A: Allocator> IntoIter<V, A> {
    pub(crate) fn new(
        inner: hash_map::IntoIter<u64, V, AllocWrapper<A>>,
    ) -> Self {
        Self { inner }
    }
}

impl<V, A: Allocator> Iterator for IntoIter<V, A> {
    type Item = (i32, i32, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.inner.next()?;
        let (a, b) = CompoundKey::from_raw(key).unpack();
        Some((a, b, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, A: Allocator> ExactSizeIterator for IntoIter<V, A> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V, A: Allocator> FusedIterator for IntoIter<V, A> {}
