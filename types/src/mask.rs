// Copyright (c) 2021, BlockProject 3D
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
//     * Redistributions of source code must retain the above copyright notice,
//       this list of conditions and the following disclaimer.
//     * Redistributions in binary form must reproduce the above copyright notice,
//       this list of conditions and the following disclaimer in the documentation
//       and/or other materials provided with the distribution.
//     * Neither the name of BlockProject 3D nor the names of its contributors
//       may be used to endorse or promote products derived from this software
//       without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF
// LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING
// NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Fixed-width bitsets used for the program-level input/output/sampler masks.
//!
//! Bit indices here are runtime register indices, not compile-time named
//! flags, so these are plain newtypes rather than a `bitflags!` struct.

use std::ops::BitOr;

macro_rules! mask_type {
    ($name: ident, $inner: ty) => {
        #[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
        pub struct $name($inner);

        impl $name {
            pub const ZERO: $name = $name(0);

            pub fn bits(self) -> $inner {
                self.0
            }

            pub fn from_bits(bits: $inner) -> $name {
                $name(bits)
            }

            pub fn set_bit(&mut self, bit: u32) {
                if (bit as u32) < (std::mem::size_of::<$inner>() as u32 * 8) {
                    self.0 |= 1 << bit;
                }
            }

            pub fn test_bit(self, bit: u32) -> bool {
                if (bit as u32) >= (std::mem::size_of::<$inner>() as u32 * 8) {
                    return false;
                }
                self.0 & (1 << bit) != 0
            }

            /// Sets every bit in `[start, start + count)`.
            pub fn set_range(&mut self, start: u32, count: u32) {
                for i in start..(start + count) {
                    self.set_bit(i);
                }
            }

            pub fn union(self, other: $name) -> $name {
                $name(self.0 | other.0)
            }

            pub fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// True if `self` is a subset of `other` (every bit set in `self` is also set in `other`).
            pub fn is_subset_of(self, other: $name) -> bool {
                self.0 & other.0 == self.0
            }
        }

        impl BitOr for $name {
            type Output = $name;

            fn bitor(self, rhs: $name) -> $name {
                self.union(rhs)
            }
        }
    };
}

mask_type!(Mask32, u32);
mask_type!(Mask64, u64);
