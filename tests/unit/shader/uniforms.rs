use super::*;

const DECLS: [UniformDecl; 3] = [
    UniformDecl::new("time", UniformKind::Float),
    UniformDecl::new("resolution", UniformKind::Vec2),
    UniformDecl::new("enableGradient", UniformKind::Int),
];

#[test]
fn slots_start_zeroed() {
    let u = ShaderUniformSet::new(&DECLS);
    assert_eq!(u.float("time"), 0.0);
    assert_eq!(u.vec2("resolution"), [0.0, 0.0]);
    assert_eq!(u.int("enableGradient"), 0);
    assert_eq!(u.decls().len(), 3);
}

#[test]
fn typed_writes_are_visible() {
    let mut u = ShaderUniformSet::new(&DECLS);
    u.set("time", UniformValue::Float(0.5)).unwrap();
    u.set("resolution", UniformValue::Vec2([320.0, 80.0])).unwrap();
    assert_eq!(u.float("time"), 0.5);
    assert_eq!(u.get("resolution"), Some(UniformValue::Vec2([320.0, 80.0])));
}

#[test]
fn unknown_names_and_kind_mismatches_fail() {
    let mut u = ShaderUniformSet::new(&DECLS);
    assert!(u.set("tme", UniformValue::Float(1.0)).is_err());
    let err = u.set("time", UniformValue::Int(1)).unwrap_err();
    assert!(err.to_string().contains("expects Float"));
    assert_eq!(u.float("time"), 0.0);
}
