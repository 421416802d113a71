use std::{
    marker::PhantomData,
    ops::{Add, BitXor, Neg},
};

pub trait BinaryOp {
    type Set;
    fn op(&self, lhs: &Self::Set, rhs: &Self::Set) -> Self::Set;
}

pub trait Identity: BinaryOp {
    fn id(&self) -> Self::Set;
}

pub trait Recip: BinaryOp {
    fn recip(&self, elt: &Self::Set) -> Self::Set;
}

/// Marker: `op` is associative.
pub trait Associative {}
/// Marker: `op` is commutative.
pub trait Commutative {}

pub trait Monoid: BinaryOp + Associative + Identity {}
pub trait Group: Monoid + Recip {}
pub trait CommutativeGroup: Group + Commutative {}

impl<T: BinaryOp + Associative + Identity> Monoid for T {}
impl<T: Monoid + Recip> Group for T {}
impl<T: Group + Commutative> CommutativeGroup for T {}

/// `(T, +, 0, -)`.
#[derive(Clone, Copy, Debug)]
pub struct OpAdd<T>(PhantomData<fn(&T) -> T>);

/// `(T, ^, 0, id)`.
#[derive(Clone, Copy, Debug)]
pub struct OpXor<T>(PhantomData<fn(&T) -> T>);

impl<T> Default for OpAdd<T> {
    fn default() -> Self { Self(PhantomData) }
}
impl<T> Default for OpXor<T> {
    fn default() -> Self { Self(PhantomData) }
}

impl<T> BinaryOp for OpAdd<T>
where
    T: Copy + Add<Output = T>,
{
    type Set = T;
    fn op(&self, &lhs: &T, &rhs: &T) -> T { lhs + rhs }
}

impl<T> Identity for OpAdd<T>
where
    T: Copy + Add<Output = T> + Default,
{
    fn id(&self) -> T { T::default() }
}

impl<T> Recip for OpAdd<T>
where
    T: Copy + Add<Output = T> + Neg<Output = T>,
{
    fn recip(&self, &elt: &T) -> T { -elt }
}

impl<T: Copy + Add<Output = T>> Associative for OpAdd<T> {}
impl<T: Copy + Add<Output = T>> Commutative for OpAdd<T> {}

impl<T> BinaryOp for OpXor<T>
where
    T: Copy + BitXor<Output = T>,
{
    type Set = T;
    fn op(&self, &lhs: &T, &rhs: &T) -> T { lhs ^ rhs }
}

impl<T> Identity for OpXor<T>
where
    T: Copy + BitXor<Output = T> + Default,
{
    fn id(&self) -> T { T::default() }
}

impl<T> Recip for OpXor<T>
where
    T: Copy + BitXor<Output = T>,
{
    fn recip(&self, &elt: &T) -> T { elt }
}

impl<T: Copy + BitXor<Output = T>> Associative for OpXor<T> {}
impl<T: Copy + BitXor<Output = T>> Commutative for OpXor<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_then_cancel<G: CommutativeGroup>(g: &G, a: &[G::Set]) -> G::Set {
        let sum = a.iter().fold(g.id(), |acc, x| g.op(&acc, x));
        a.iter().fold(sum, |acc, x| g.op(&acc, &g.recip(x)))
    }

    #[test]
    fn add() {
        let add = OpAdd::<i64>::default();
        assert_eq!(add.op(&1, &2), 3);
        assert_eq!(add.id(), 0);
        assert_eq!(add.recip(&5), -5);
        assert_eq!(sum_then_cancel(&add, &[3, -1, 4, 1, -5]), 0);
    }

    #[test]
    fn xor() {
        let xor = OpXor::<u32>::default();
        assert_eq!(xor.op(&0b1100, &0b1010), 0b0110);
        assert_eq!(xor.id(), 0);
        assert_eq!(xor.recip(&7), 7);
        assert_eq!(sum_then_cancel(&xor, &[3, 1, 4, 1, 5]), 0);
    }
}
