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

use crate::param::VaryingFlags;
use crate::value::DataType;

/// One program-wide varying: position in [`VaryingTable`] is the linked slot.
#[derive(Clone, Debug, PartialEq)]
pub struct VaryingEntry {
    pub name: String,
    pub size: u32,
    pub data_type: DataType,
    pub flags: VaryingFlags,
}

/// `ShaderProgram.Varyings`: the ordered, name-unique list built by the
/// varying merger (§4.2).
#[derive(Default, Debug)]
pub struct VaryingTable {
    entries: Vec<VaryingEntry>,
}

impl VaryingTable {
    pub fn new() -> VaryingTable {
        VaryingTable::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn get(&self, slot: usize) -> &VaryingEntry {
        &self.entries[slot]
    }

    /// Appends a new varying, returning its linked slot.
    pub fn push(&mut self, entry: VaryingEntry) -> usize {
        let slot = self.entries.len();
        self.entries.push(entry);
        slot
    }

    pub fn iter(&self) -> impl Iterator<Item = &VaryingEntry> {
        self.entries.iter()
    }
}
