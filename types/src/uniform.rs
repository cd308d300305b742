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

use crate::stage::StageKind;

/// A program-wide uniform: back-pointers to the parameter-list index that
/// declared it in each stage (absent stages are `None`).
#[derive(Clone, Debug, Default)]
pub struct UniformEntry {
    pub name: String,
    pub vertex_param: Option<usize>,
    pub geometry_param: Option<usize>,
    pub fragment_param: Option<usize>,
}

impl UniformEntry {
    pub fn new(name: impl Into<String>) -> UniformEntry {
        UniformEntry {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn set_stage_param(&mut self, stage: StageKind, param_index: usize) {
        match stage {
            StageKind::Vertex => self.vertex_param = Some(param_index),
            StageKind::Geometry => self.geometry_param = Some(param_index),
            StageKind::Fragment => self.fragment_param = Some(param_index),
        }
    }

    pub fn stage_param(&self, stage: StageKind) -> Option<usize> {
        match stage {
            StageKind::Vertex => self.vertex_param,
            StageKind::Geometry => self.geometry_param,
            StageKind::Fragment => self.fragment_param,
        }
    }
}

/// `ShaderProgram.Uniforms`: the ordered list built by the uniform merger
/// (§4.3). A name may appear in multiple stages; it gets one entry.
#[derive(Default, Debug)]
pub struct UniformTable {
    entries: Vec<UniformEntry>,
}

impl UniformTable {
    pub fn new() -> UniformTable {
        UniformTable::default()
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

    pub fn get(&self, index: usize) -> &UniformEntry {
        &self.entries[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut UniformEntry {
        &mut self.entries[index]
    }

    /// Returns the index of the entry for `name`, inserting a fresh one if
    /// this is the first stage to declare it.
    pub fn get_or_insert(&mut self, name: &str) -> usize {
        if let Some(idx) = self.find(name) {
            idx
        } else {
            let idx = self.entries.len();
            self.entries.push(UniformEntry::new(name));
            idx
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &UniformEntry> {
        self.entries.iter()
    }
}
