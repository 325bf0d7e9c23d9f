use crate::foundation::error::{GlyphFxError, GlyphFxResult};

/// Declared type of a uniform slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformKind {
    /// `float`
    Float,
    /// `float2`
    Vec2,
    /// `float4` / `vec4`
    Vec4,
    /// `int`
    Int,
}

/// A typed uniform value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    /// `float`
    Float(f32),
    /// `float2`
    Vec2([f32; 2]),
    /// `float4`
    Vec4([f32; 4]),
    /// `int`
    Int(i32),
}

impl UniformValue {
    /// Kind of this value.
    pub fn kind(&self) -> UniformKind {
        match self {
            Self::Float(_) => UniformKind::Float,
            Self::Vec2(_) => UniformKind::Vec2,
            Self::Vec4(_) => UniformKind::Vec4,
            Self::Int(_) => UniformKind::Int,
        }
    }

    fn zero(kind: UniformKind) -> Self {
        match kind {
            UniformKind::Float => Self::Float(0.0),
            UniformKind::Vec2 => Self::Vec2([0.0; 2]),
            UniformKind::Vec4 => Self::Vec4([0.0; 4]),
            UniformKind::Int => Self::Int(0),
        }
    }
}

/// Name and type of one uniform a program reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformDecl {
    /// Uniform name as the program refers to it.
    pub name: &'static str,
    /// Expected type.
    pub kind: UniformKind,
}

impl UniformDecl {
    /// Shorthand constructor.
    pub const fn new(name: &'static str, kind: UniformKind) -> Self {
        Self { name, kind }
    }
}

/// The uniform block of one bound program instance.
///
/// Every declared slot starts zeroed. Writes are checked against the declaration, so a typo or a
/// type mismatch fails loudly instead of silently rendering with stale values.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderUniformSet {
    decls: Vec<UniformDecl>,
    values: Vec<UniformValue>,
}

impl ShaderUniformSet {
    /// Zeroed uniform block for `decls`.
    pub fn new(decls: &[UniformDecl]) -> Self {
        Self {
            decls: decls.to_vec(),
            values: decls.iter().map(|d| UniformValue::zero(d.kind)).collect(),
        }
    }

    fn slot(&self, name: &str) -> Option<usize> {
        self.decls.iter().position(|d| d.name == name)
    }

    /// Write `value` into the slot `name`.
    pub fn set(&mut self, name: &str, value: UniformValue) -> GlyphFxResult<()> {
        let i = self
            .slot(name)
            .ok_or_else(|| GlyphFxError::validation(format!("unknown uniform '{name}'")))?;
        let expected = self.decls[i].kind;
        if value.kind() != expected {
            return Err(GlyphFxError::validation(format!(
                "uniform '{name}' expects {expected:?}, got {:?}",
                value.kind()
            )));
        }
        self.values[i] = value;
        Ok(())
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.slot(name).map(|i| self.values[i])
    }

    /// `float` uniform, 0 when missing or mistyped.
    pub fn float(&self, name: &str) -> f32 {
        match self.get(name) {
            Some(UniformValue::Float(v)) => v,
            _ => 0.0,
        }
    }

    /// `float2` uniform, zero when missing or mistyped.
    pub fn vec2(&self, name: &str) -> [f32; 2] {
        match self.get(name) {
            Some(UniformValue::Vec2(v)) => v,
            _ => [0.0; 2],
        }
    }

    /// `float4` uniform, zero when missing or mistyped.
    pub fn vec4(&self, name: &str) -> [f32; 4] {
        match self.get(name) {
            Some(UniformValue::Vec4(v)) => v,
            _ => [0.0; 4],
        }
    }

    /// `int` uniform, 0 when missing or mistyped.
    pub fn int(&self, name: &str) -> i32 {
        match self.get(name) {
            Some(UniformValue::Int(v)) => v,
            _ => 0,
        }
    }

    /// Declarations in slot order.
    pub fn decls(&self) -> &[UniformDecl] {
        &self.decls
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/uniforms.rs"]
mod tests;
