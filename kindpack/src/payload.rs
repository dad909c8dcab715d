use crate::{
    bits::{extract, insert},
    Payload,
};

macro_rules! impl_unsigned_payload {
    ($($ty:ty),*) => {
        $(
            impl Payload for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();
                fn into_bits(self) -> u128 {
                    self as u128
                }
                #[allow(clippy::cast_possible_truncation)]
                fn from_bits(bits: u128) -> Self {
                    bits as $ty
                }
            }
        )*
    };
}

macro_rules! impl_signed_payload {
    ($($ty:ty => $unsigned:ty),*) => {
        $(
            impl Payload for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();
                const SIGNED: bool = true;
                #[allow(clippy::cast_sign_loss)]
                fn into_bits(self) -> u128 {
                    self as $unsigned as u128
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                fn from_bits(bits: u128) -> Self {
                    bits as $unsigned as $ty
                }
            }
        )*
    };
}

impl_unsigned_payload!(u8, u16, u32, u64, u128);
impl_signed_payload!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128);

impl Payload for () {
    const SIZE: usize = 0;
    fn into_bits(self) -> u128 {
        0
    }
    fn from_bits(_bits: u128) -> Self {}
}

impl Payload for bool {
    const SIZE: usize = 1;
    fn into_bits(self) -> u128 {
        u128::from(self)
    }
    fn from_bits(bits: u128) -> Self {
        bits & 1 == 1
    }
}

impl Payload for char {
    const SIZE: usize = 4;
    fn into_bits(self) -> u128 {
        u128::from(u32::from(self))
    }
    #[allow(clippy::cast_possible_truncation)]
    fn from_bits(bits: u128) -> Self {
        char::from_u32(bits as u32).unwrap_or_default()
    }
}

impl Payload for f32 {
    const SIZE: usize = 4;
    fn into_bits(self) -> u128 {
        u128::from(self.to_bits())
    }
    #[allow(clippy::cast_possible_truncation)]
    fn from_bits(bits: u128) -> Self {
        f32::from_bits(bits as u32)
    }
}

impl Payload for f64 {
    const SIZE: usize = 8;
    fn into_bits(self) -> u128 {
        u128::from(self.to_bits())
    }
    #[allow(clippy::cast_possible_truncation)]
    fn from_bits(bits: u128) -> Self {
        f64::from_bits(bits as u64)
    }
}

impl<T: Payload, const N: usize> Payload for [T; N] {
    const SIZE: usize = T::SIZE * N;
    fn into_bits(self) -> u128 {
        let mut bits = 0;
        for (i, element) in self.into_iter().enumerate() {
            bits = insert(bits, element.into_bits(), i * T::SIZE, T::SIZE);
        }
        bits
    }
    fn from_bits(bits: u128) -> Self {
        core::array::from_fn(|i| T::from_bits(extract(bits, i * T::SIZE, T::SIZE)))
    }
}

impl<A: Payload, B: Payload> Payload for (A, B) {
    const SIZE: usize = A::SIZE + B::SIZE;
    fn into_bits(self) -> u128 {
        let bits = insert(0, self.0.into_bits(), 0, A::SIZE);
        insert(bits, self.1.into_bits(), A::SIZE, B::SIZE)
    }
    fn from_bits(bits: u128) -> Self {
        (
            A::from_bits(extract(bits, 0, A::SIZE)),
            B::from_bits(extract(bits, A::SIZE, B::SIZE)),
        )
    }
}

impl<A: Payload, B: Payload, C: Payload> Payload for (A, B, C) {
    const SIZE: usize = A::SIZE + B::SIZE + C::SIZE;
    fn into_bits(self) -> u128 {
        let bits = insert(0, self.0.into_bits(), 0, A::SIZE);
        let bits = insert(bits, self.1.into_bits(), A::SIZE, B::SIZE);
        insert(bits, self.2.into_bits(), A::SIZE + B::SIZE, C::SIZE)
    }
    fn from_bits(bits: u128) -> Self {
        (
            A::from_bits(extract(bits, 0, A::SIZE)),
            B::from_bits(extract(bits, A::SIZE, B::SIZE)),
            C::from_bits(extract(bits, A::SIZE + B::SIZE, C::SIZE)),
        )
    }
}

/// A nullable payload is the value's bytes followed by a has-value byte.
impl<T: Payload> Payload for Option<T> {
    const SIZE: usize = T::SIZE + 1;
    const SIGNED: bool = T::SIGNED;
    fn into_bits(self) -> u128 {
        match self {
            Some(value) => insert(value.into_bits(), 1, T::SIZE, 1),
            None => 0,
        }
    }
    fn from_bits(bits: u128) -> Self {
        if extract(bits, T::SIZE, 1) == 1 {
            Some(T::from_bits(extract(bits, 0, T::SIZE)))
        } else {
            None
        }
    }
}
