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

use crate::value::DataType;

/// One program-wide attribute. `slot` is `None` for built-ins (position,
/// normal, texture coordinates, ...) published for introspection only; a
/// `Some(n)` slot is a generic attribute in `[0, MaxGenericAttribs)`.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeEntry {
    pub name: String,
    pub size: u32,
    pub data_type: DataType,
    pub slot: Option<u32>,
}

/// One entry of the vertex stage's pre-link attribute list: the name and
/// type of a generic vertex input as declared by the front-end, before slot
/// assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeParam {
    pub name: String,
    pub size: u32,
    pub data_type: DataType,
}

impl AttributeParam {
    pub fn new(name: impl Into<String>, size: u32, data_type: DataType) -> AttributeParam {
        AttributeParam {
            name: name.into(),
            size,
            data_type,
        }
    }
}

/// `ShaderProgram.Attributes`: built by the attribute resolver (§4.4).
#[derive(Default, Debug)]
pub struct AttributeTable {
    entries: Vec<AttributeEntry>,
}

impl AttributeTable {
    pub fn new() -> AttributeTable {
        AttributeTable::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: AttributeEntry) {
        self.entries.push(entry);
    }

    pub fn find_by_slot(&self, slot: u32) -> Option<&AttributeEntry> {
        self.entries.iter().find(|e| e.slot == Some(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeEntry> {
        self.entries.iter()
    }
}
