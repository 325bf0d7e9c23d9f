use super::*;
use crate::shader::uniforms::UniformKind;

#[derive(Debug)]
struct Tint;

impl FragmentProgram for Tint {
    fn name(&self) -> &'static str {
        "tint"
    }

    fn uniforms(&self) -> Vec<UniformDecl> {
        vec![UniformDecl::new("color", UniformKind::Vec4)]
    }

    fn shade(
        &self,
        u: &ShaderUniformSet,
        _frag: Point,
        _content: Option<&PixelBuffer>,
    ) -> [f32; 4] {
        u.vec4("color")
    }
}

#[test]
fn unsupported_host_refuses_to_bind() {
    let bridge = ShaderBridge::new(HostCaps {
        shaders: false,
        ..HostCaps::default()
    });
    let err = bridge.bind(Arc::new(Tint)).unwrap_err();
    assert!(matches!(err, GlyphFxError::UnsupportedCapability(_)));
    assert_eq!(bridge.live_handles(), 0);
}

#[test]
fn handles_are_counted_and_released_on_drop() {
    let bridge = ShaderBridge::new(HostCaps {
        shaders: true,
        max_live_handles: 2,
    });
    let a = bridge.bind(Arc::new(Tint)).unwrap();
    let b = bridge.bind(Arc::new(Tint)).unwrap();
    assert_eq!(bridge.live_handles(), 2);

    let err = bridge.bind(Arc::new(Tint)).unwrap_err();
    assert!(matches!(err, GlyphFxError::ResourceExhausted(_)));

    drop(a);
    assert_eq!(bridge.live_handles(), 1);
    let c = bridge.bind(Arc::new(Tint)).unwrap();
    drop((b, c));
    assert_eq!(bridge.live_handles(), 0);
}

#[test]
fn handles_release_on_error_paths() {
    let bridge = ShaderBridge::new(HostCaps::default());
    let result: GlyphFxResult<()> = (|| {
        let mut h = bridge.bind(Arc::new(Tint))?;
        h.set_uniform("nope", UniformValue::Float(1.0))?;
        Ok(())
    })();
    assert!(result.is_err());
    assert_eq!(bridge.live_handles(), 0);
}

#[test]
fn evaluate_writes_premultiplied_pixels() {
    let bridge = ShaderBridge::new(HostCaps::default());
    let mut h = bridge.bind(Arc::new(Tint)).unwrap();
    h.set_uniform("color", UniformValue::Vec4([0.5, 0.25, 0.0, 0.5]))
        .unwrap();
    let out = h.evaluate(3, 2, None).unwrap();
    assert_eq!((out.width(), out.height()), (3, 2));
    assert_eq!(out.pixel(2, 1), [128, 64, 0, 128]);
    assert!(h.evaluate(0, 4, None).unwrap().is_empty());
}

#[test]
fn separate_handles_do_not_share_uniforms() {
    let bridge = ShaderBridge::new(HostCaps::default());
    let program: Arc<dyn FragmentProgram> = Arc::new(Tint);
    let mut a = bridge.bind(Arc::clone(&program)).unwrap();
    let b = bridge.bind(program).unwrap();
    a.set_uniform("color", UniformValue::Vec4([1.0; 4])).unwrap();
    assert_eq!(b.uniforms().vec4("color"), [0.0; 4]);
}
