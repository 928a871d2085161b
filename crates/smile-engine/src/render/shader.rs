//! WGSL validation and binding reflection.
//!
//! The shader is checked with naga before wgpu sees it, so a bad source becomes
//! a `RenderError::ShaderBuild` instead of a device-level panic. Reflection then
//! resolves the four named bindings the pipeline is built around.

use wgpu::naga;

use crate::error::RenderError;

pub const VS_ENTRY: &str = "vs_main";
pub const FS_ENTRY: &str = "fs_main";

pub const ATTR_POSITION: &str = "a_Position";
pub const ATTR_TEXTURE: &str = "a_Texture";
pub const UNIFORM_TEXTURE_UNIT: &str = "u_TextureUnit";
pub const UNIFORM_MATRIX: &str = "u_Matrix";
pub const UNIFORM_SAMPLER: &str = "u_Sampler";

/// Bind group slot of a resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResourceSlot {
    pub group: u32,
    pub binding: u32,
}

/// Resolved locations of everything the textured-quad pipeline binds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShaderBindings {
    pub position: u32,
    pub tex_coord: u32,
    pub texture_unit: ResourceSlot,
    pub sampler: ResourceSlot,
    pub matrix: ResourceSlot,
}

impl ShaderBindings {
    /// Checks that the layout fits the pipeline: the matrix alone in one group, the
    /// texture and sampler together in the other, groups numbered 0 and 1.
    pub fn check_layout(&self) -> Result<(), RenderError> {
        if self.position == self.tex_coord {
            return Err(RenderError::BindingLayout(format!(
                "{ATTR_POSITION} and {ATTR_TEXTURE} share location {}",
                self.position
            )));
        }
        if self.texture_unit.group != self.sampler.group {
            return Err(RenderError::BindingLayout(format!(
                "{UNIFORM_TEXTURE_UNIT} and {UNIFORM_SAMPLER} must share a bind group"
            )));
        }
        if self.texture_unit.binding == self.sampler.binding {
            return Err(RenderError::BindingLayout(format!(
                "{UNIFORM_TEXTURE_UNIT} and {UNIFORM_SAMPLER} share binding {}",
                self.sampler.binding
            )));
        }

        let mut groups = [self.matrix.group, self.texture_unit.group];
        groups.sort_unstable();
        if groups != [0, 1] {
            return Err(RenderError::BindingLayout(format!(
                "expected {UNIFORM_MATRIX} and {UNIFORM_TEXTURE_UNIT} in groups 0 and 1, found {} and {}",
                self.matrix.group, self.texture_unit.group
            )));
        }
        Ok(())
    }
}

/// Parses and validates `source`, returning the naga module.
pub fn validate(source: &str) -> Result<naga::Module, RenderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| RenderError::ShaderBuild(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| RenderError::ShaderBuild(e.emit_to_string(source)))?;

    Ok(module)
}

/// Resolves the named attributes and resources from a validated module.
pub fn reflect(module: &naga::Module) -> Result<ShaderBindings, RenderError> {
    let vertex = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga::ShaderStage::Vertex && ep.name == VS_ENTRY)
        .ok_or(RenderError::MissingBinding(VS_ENTRY))?;

    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga::ShaderStage::Fragment && ep.name == FS_ENTRY)
        .ok_or(RenderError::MissingBinding(FS_ENTRY))?;

    let attribute = |name: &'static str| {
        vertex
            .function
            .arguments
            .iter()
            .find(|arg| arg.name.as_deref() == Some(name))
            .and_then(|arg| match &arg.binding {
                Some(naga::Binding::Location { location, .. }) => Some(*location),
                _ => None,
            })
            .ok_or(RenderError::MissingBinding(name))
    };

    let resource = |name: &'static str| {
        module
            .global_variables
            .iter()
            .find(|(_, var)| var.name.as_deref() == Some(name))
            .and_then(|(_, var)| var.binding.as_ref())
            .map(|rb| ResourceSlot { group: rb.group, binding: rb.binding })
            .ok_or(RenderError::MissingBinding(name))
    };

    Ok(ShaderBindings {
        position: attribute(ATTR_POSITION)?,
        tex_coord: attribute(ATTR_TEXTURE)?,
        texture_unit: resource(UNIFORM_TEXTURE_UNIT)?,
        sampler: resource(UNIFORM_SAMPLER)?,
        matrix: resource(UNIFORM_MATRIX)?,
    })
}

/// Validates, reflects, and checks layout in one step.
pub fn build(source: &str) -> Result<ShaderBindings, RenderError> {
    let module = validate(source)?;
    let bindings = reflect(&module)?;
    bindings.check_layout()?;
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHADER: &str = include_str!("shaders/textured_quad.wgsl");

    #[test]
    fn bundled_shader_resolves_all_bindings() {
        let b = build(SHADER).unwrap();
        assert_eq!(b.position, 0);
        assert_eq!(b.tex_coord, 1);
        assert_eq!(b.matrix, ResourceSlot { group: 0, binding: 0 });
        assert_eq!(b.texture_unit, ResourceSlot { group: 1, binding: 0 });
        assert_eq!(b.sampler, ResourceSlot { group: 1, binding: 1 });
    }

    #[test]
    fn reordered_locations_are_followed() {
        let src = SHADER
            .replace("@location(0) a_Position", "@location(3) a_Position")
            .replace("@location(1) a_Texture", "@location(0) a_Texture");
        let b = build(&src).unwrap();
        assert_eq!(b.position, 3);
        assert_eq!(b.tex_coord, 0);
    }

    #[test]
    fn syntax_error_is_shader_build() {
        let err = validate("fn vs_main( {").unwrap_err();
        assert!(matches!(err, RenderError::ShaderBuild(_)));
    }

    #[test]
    fn type_error_is_shader_build() {
        let src = SHADER.replace("vec4<f32>(a_Position, 1.0)", "a_Position");
        let err = validate(&src).unwrap_err();
        assert!(matches!(err, RenderError::ShaderBuild(_)));
    }

    #[test]
    fn renamed_attribute_is_missing_binding() {
        let src = SHADER.replace("a_Texture", "a_Uv");
        let err = build(&src).unwrap_err();
        assert!(matches!(err, RenderError::MissingBinding(ATTR_TEXTURE)));
    }

    #[test]
    fn renamed_matrix_is_missing_binding() {
        let src = SHADER.replace("u_Matrix", "u_Mvp");
        let err = build(&src).unwrap_err();
        assert!(matches!(err, RenderError::MissingBinding(UNIFORM_MATRIX)));
    }

    #[test]
    fn texture_and_sampler_in_different_groups_is_rejected() {
        let src = SHADER.replace(
            "@group(1) @binding(1) var u_Sampler",
            "@group(0) @binding(1) var u_Sampler",
        );
        let err = build(&src).unwrap_err();
        assert!(matches!(err, RenderError::BindingLayout(_)));
    }

    #[test]
    fn swapped_groups_are_accepted() {
        let src = SHADER
            .replace("@group(0) @binding(0) var<uniform> u_Matrix", "@group(1) @binding(0) var<uniform> u_Matrix")
            .replace("@group(1) @binding(0) var u_TextureUnit", "@group(0) @binding(0) var u_TextureUnit")
            .replace("@group(1) @binding(1) var u_Sampler", "@group(0) @binding(1) var u_Sampler");
        let b = build(&src).unwrap();
        assert_eq!(b.matrix.group, 1);
        assert_eq!(b.texture_unit.group, 0);
    }
}
