// Host-side checks for the galaxy WGSL: it must parse and validate, and its
// uniform block must match the Rust struct uploaded each frame.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod ease {
    include!("../src/core/ease.rs");
}
mod config {
    include!("../src/core/config.rs");
}
mod blend {
    include!("../src/core/blend.rs");
}
mod uniforms {
    include!("../src/core/uniforms.rs");
}

use std::mem::{offset_of, size_of};
use uniforms::GalaxyUniforms;

const GALAXY_WGSL: &str = include_str!("../shaders/galaxy.wgsl");

fn parse() -> naga::Module {
    naga::front::wgsl::parse_str(GALAXY_WGSL).expect("galaxy.wgsl should parse")
}

#[test]
fn shader_parses_and_validates() {
    let module = parse();
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .expect("galaxy.wgsl should validate");
}

#[test]
fn shader_exposes_expected_entry_points() {
    let module = parse();
    let names: Vec<&str> = module
        .entry_points
        .iter()
        .map(|ep| ep.name.as_str())
        .collect();
    assert!(names.contains(&"vs_fullscreen"));
    assert!(names.contains(&"fs_galaxy"));
}

#[test]
fn uniform_block_matches_rust_layout() {
    let module = parse();
    let (_, var) = module
        .global_variables
        .iter()
        .find(|(_, v)| v.name.as_deref() == Some("u"))
        .expect("uniform `u` should exist");
    let (members, span) = match &module.types[var.ty].inner {
        naga::TypeInner::Struct { members, span } => (members, *span),
        other => panic!("uniform `u` is not a struct: {:?}", other),
    };
    assert_eq!(span as usize, size_of::<GalaxyUniforms>());

    let rust_offsets = [
        ("resolution", offset_of!(GalaxyUniforms, resolution)),
        ("focal", offset_of!(GalaxyUniforms, focal)),
        ("rotation", offset_of!(GalaxyUniforms, rotation)),
        ("mouse", offset_of!(GalaxyUniforms, mouse)),
        ("time", offset_of!(GalaxyUniforms, time)),
        ("star_speed", offset_of!(GalaxyUniforms, star_speed)),
        ("density", offset_of!(GalaxyUniforms, density)),
        ("hue_shift", offset_of!(GalaxyUniforms, hue_shift)),
        ("speed", offset_of!(GalaxyUniforms, speed)),
        ("glow_intensity", offset_of!(GalaxyUniforms, glow_intensity)),
        ("saturation", offset_of!(GalaxyUniforms, saturation)),
        ("twinkle_intensity", offset_of!(GalaxyUniforms, twinkle_intensity)),
        ("rotation_speed", offset_of!(GalaxyUniforms, rotation_speed)),
        ("repulsion_strength", offset_of!(GalaxyUniforms, repulsion_strength)),
        ("mouse_active_factor", offset_of!(GalaxyUniforms, mouse_active_factor)),
        ("auto_center_repulsion", offset_of!(GalaxyUniforms, auto_center_repulsion)),
        ("mouse_repulsion", offset_of!(GalaxyUniforms, mouse_repulsion)),
        ("transparent", offset_of!(GalaxyUniforms, transparent)),
        ("num_layers", offset_of!(GalaxyUniforms, num_layers)),
        ("warp_progress", offset_of!(GalaxyUniforms, warp_progress)),
        ("exit_progress", offset_of!(GalaxyUniforms, exit_progress)),
        ("_pad", offset_of!(GalaxyUniforms, _pad)),
    ];
    assert_eq!(members.len(), rust_offsets.len());
    for (member, (name, offset)) in members.iter().zip(rust_offsets) {
        assert_eq!(member.name.as_deref(), Some(name));
        assert_eq!(member.offset as usize, offset, "offset of {}", name);
    }
}

#[test]
fn uniform_size_is_a_multiple_of_sixteen() {
    assert_eq!(size_of::<GalaxyUniforms>() % 16, 0);
}

/// Whether `fs_galaxy` loads the named member of the uniform `u`.
fn fragment_reads(module: &naga::Module, member: &str) -> bool {
    let (u_handle, var) = module
        .global_variables
        .iter()
        .find(|(_, v)| v.name.as_deref() == Some("u"))
        .expect("uniform `u` should exist");
    let index = match &module.types[var.ty].inner {
        naga::TypeInner::Struct { members, .. } => members
            .iter()
            .position(|m| m.name.as_deref() == Some(member))
            .expect("member should exist") as u32,
        _ => panic!("uniform `u` is not a struct"),
    };
    let ep = module
        .entry_points
        .iter()
        .find(|ep| ep.name == "fs_galaxy")
        .expect("fs_galaxy should exist");
    let exprs = &ep.function.expressions;
    exprs.iter().any(|(_, e)| match e {
        naga::Expression::AccessIndex { base, index: i } => {
            *i == index
                && matches!(exprs[*base], naga::Expression::GlobalVariable(g) if g == u_handle)
        }
        _ => false,
    })
}

#[test]
fn fragment_stage_consumes_progress_uniforms() {
    let module = parse();
    assert!(fragment_reads(&module, "warp_progress"));
    assert!(fragment_reads(&module, "exit_progress"));
    assert!(fragment_reads(&module, "star_speed"));
    assert!(!fragment_reads(&module, "_pad"));
}
