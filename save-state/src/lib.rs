//! Byte-level serialization of emulator state.
//!
//! Every piece of machine state that participates in a snapshot implements
//! [`InSaveState`]: it appends its bytes to a [`SaveStateSerializer`] and
//! reads them back from a [`SaveStateDeserializer`] in the same order. The
//! format is a plain little-endian byte stream with no framing; producer
//! and consumer must agree on the field order (which the derive macro in
//! `save-state-macro` guarantees for structs).


pub struct SaveStateSerializer {
    pub data: Vec<u8>,
}

pub struct SaveStateDeserializer<'a> {
    pub data: core::slice::Iter<'a, u8>,
}

impl<'a> SaveStateDeserializer<'a> {
    pub fn consume(&mut self, n: usize) {
        if n > 0 {
            let _ = self.data.nth(n - 1);
        }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let slice = self.data.as_slice();
        if slice.len() < N {
            panic!("not enough data to deserialize")
        }
        let bytes = slice[..N].try_into().unwrap();
        self.consume(N);
        bytes
    }
}

pub trait InSaveState: Sized {
    fn serialize(&self, state: &mut SaveStateSerializer);
    fn deserialize(&mut self, state: &mut SaveStateDeserializer);
}

macro_rules! impl_for_int {
    ($($t:ty),*) => {$(
        impl InSaveState for $t {
            fn serialize(&self, state: &mut SaveStateSerializer) {
                state.data.extend_from_slice(&self.to_le_bytes())
            }

            fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
                *self = Self::from_le_bytes(state.take());
            }
        }
    )*};
}

impl_for_int! { u8, u16, u32, u64, i8, i16, i32, i64 }

impl InSaveState for bool {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        u8::from(*self).serialize(state)
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        let mut v = 0u8;
        v.deserialize(state);
        *self = v != 0
    }
}

impl<T: InSaveState, const N: usize> InSaveState for [T; N] {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        for v in self.iter() {
            v.serialize(state)
        }
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        for v in self.iter_mut() {
            v.deserialize(state)
        }
    }
}

/// Length-prefixed byte buffer (the length is stored as a `u64`).
impl InSaveState for Vec<u8> {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        (self.len() as u64).serialize(state);
        state.data.extend_from_slice(self)
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        let mut len = 0u64;
        len.deserialize(state);
        let len = len as usize;
        let slice = state.data.as_slice();
        if slice.len() < len {
            panic!("not enough data to deserialize")
        }
        self.clear();
        self.extend_from_slice(&slice[..len]);
        state.consume(len);
    }
}
