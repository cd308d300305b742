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

/// What kind of program-wide symbol a parameter-list entry contributes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ParameterKind {
    Uniform,
    Sampler,
    Varying,
    /// e.g. the built-in modelview matrix; see DESIGN.md for how these are
    /// (or aren't) surfaced in the program-wide uniform table.
    StateVariable,
}

/// Per-varying flag bits that must match bit-for-bit across stages
/// (invariant 2 of the data model).
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct VaryingFlags {
    pub centroid: bool,
    pub invariant: bool,
}

/// One entry of a stage's parameter list: a uniform, sampler, varying or
/// state-variable declaration as seen by the front-end.
#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: String,
    /// Element size in floats (e.g. 4 for a vec4, 16 for a mat4).
    pub size: u32,
    pub data_type: DataType,
    pub kind: ParameterKind,
    pub flags: VaryingFlags,
    /// Whether this entry is actually referenced by the stage's instruction
    /// stream. Unused entries are not merged or assigned storage.
    pub used: bool,
    /// Scratch float storage: for a sampler, slot 0 holds the local sampler
    /// number the front-end assigned before linking; the sampler merger
    /// overwrites it with the assigned program-wide unit.
    pub values: Vec<f32>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, size: u32, data_type: DataType, kind: ParameterKind) -> Parameter {
        Parameter {
            name: name.into(),
            size,
            data_type,
            kind,
            flags: VaryingFlags::default(),
            used: true,
            values: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: VaryingFlags) -> Parameter {
        self.flags = flags;
        self
    }

    pub fn with_used(mut self, used: bool) -> Parameter {
        self.used = used;
        self
    }

    pub fn local_sampler_number(&self) -> u32 {
        self.values.first().copied().unwrap_or(0.0) as u32
    }

    pub fn set_local_sampler_number(&mut self, unit: u32) {
        if self.values.is_empty() {
            self.values.push(unit as f32);
        } else {
            self.values[0] = unit as f32;
        }
    }
}
