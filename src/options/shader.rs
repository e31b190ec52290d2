use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Shaders", inline)]
#[serde(default)]
/// Shader compilation and program behaviour.
pub struct ShaderOptions {
    /// Check GLSL with naga before handing it to the driver.
    #[schemars(title = "Validate GLSL")]
    pub validate_glsl: bool,
    /// Forget cached uniform locations after a successful relink.
    #[schemars(title = "Clear Uniforms On Link")]
    pub clear_uniforms_on_link: bool,
}

impl Default for ShaderOptions {
    fn default() -> Self {
        Self {
            validate_glsl: false,
            clear_uniforms_on_link: true,
        }
    }
}
