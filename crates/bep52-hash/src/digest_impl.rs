//! RustCrypto `digest` integration, so a [`Bep52Hasher`] can stand in for any
//! `D: Digest`.

use digest::consts::U32;
use digest::{FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update};

use crate::hasher::Bep52Hasher;

impl OutputSizeUser for Bep52Hasher {
    type OutputSize = U32;
}

impl Update for Bep52Hasher {
    fn update(&mut self, data: &[u8]) {
        self.absorb(data);
    }
}

impl FixedOutput for Bep52Hasher {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.root());
    }
}

impl Reset for Bep52Hasher {
    fn reset(&mut self) {
        Bep52Hasher::reset(self);
    }
}

impl FixedOutputReset for Bep52Hasher {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.root());
        Bep52Hasher::reset(self);
    }
}

impl HashMarker for Bep52Hasher {}
