use extrudekit_settings::{Settings, SettingsOverrides};
use extrudekit_toolpath::{
    generate, generate_program, BareFrame, GcodeWriter, PatternMode, PrusaMk3sFrame, Session,
    ToolpathError,
};

fn overrides(pairs: &[&str]) -> SettingsOverrides {
    SettingsOverrides::from_pairs(pairs.iter().copied()).unwrap()
}

#[test]
fn test_line_iteration_one() {
    let gcode = generate(
        "line",
        1,
        &Settings::default(),
        &overrides(&["lineSpacing=0.2146"]),
    )
    .unwrap();

    let lines: Vec<_> = gcode.lines().collect();
    assert_eq!(
        lines,
        vec![
            "G0 Z0.2 F720 ; Move to z height",
            "G1 E-1.5 F1800 ; Retract",
            "G1 Z0.4 F720 ; Z hop",
            "G0 X15 Y10.2146 F4800 ; Moving to line position",
            "G1 Z0.2 F720 ; Z hop return",
            "G1 E1.5 F1800 ; Un-retract",
            "M204 S800",
            "; printing line start id:0 copy 0",
            "G1 X115 Y10.2146 E6.23628 F2400 ; Create Line",
            "; stop printing line id:0 copy 0",
            "G1 E-1.5 F1800 ; Retract",
        ]
    );
}

#[test]
fn test_line_without_zhop() {
    let gcode = generate(
        "L",
        2,
        &Settings::default(),
        &overrides(&["zhopEnable=false"]),
    )
    .unwrap();
    assert!(!gcode.contains("Z hop"));
    assert!(gcode.contains("G0 X30 "));
}

#[test]
fn test_print_dir_rotates_line() {
    let gcode = generate(
        "line",
        1,
        &Settings::default(),
        &overrides(&["printDir=180", "lineSpacing=0", "centerX=100", "centerY=125"]),
    );
    // lineSpacing must be positive
    assert!(matches!(gcode, Err(ToolpathError::Settings(_))));

    let gcode = generate(
        "line",
        1,
        &Settings::default(),
        &overrides(&["printDir=180", "lineSpacing=0.5", "centerX=100", "centerY=125"]),
    )
    .unwrap();
    // (15, 10.5) mirrored through (100, 125)
    assert!(gcode.contains("G0 X185 Y239.5 F4800 ; Moving to line position"));
    assert!(gcode.contains("G1 X85 Y239.5 "));
}

#[test]
fn test_plane_program() {
    let gcode = generate("plane", 1, &Settings::default(), &SettingsOverrides::default()).unwrap();
    assert!(gcode.starts_with("G0 Z0.2 F720 ; Move to z height\n"));
    assert!(gcode.contains("; printing plane start id:0 copy 0"));
    assert_eq!(gcode.matches("Draw perimeter (up)").count(), 4);
    assert!(gcode.contains("Move to fill start"));
    assert!(gcode.trim_end().ends_with("; stop printing plane id:0 copy 0"));
}

#[test]
fn test_plane_perimeters_override() {
    let gcode = generate(
        "p",
        1,
        &Settings::default(),
        &overrides(&["anchorPerimeters=2"]),
    )
    .unwrap();
    assert_eq!(gcode.matches("Draw perimeter (up)").count(), 2);
    assert_eq!(gcode.matches("Step inwards to print next perimeter").count(), 1);
}

#[test]
fn test_cube_is_empty() {
    let gcode = generate("cube", 1, &Settings::default(), &SettingsOverrides::default()).unwrap();
    assert!(gcode.is_empty());
}

#[test]
fn test_unknown_mode_produces_nothing() {
    let err = generate("zigzag", 1, &Settings::default(), &SettingsOverrides::default())
        .unwrap_err();
    assert!(matches!(err, ToolpathError::UnknownMode(_)));
    assert!(err.is_usage_error());

    let err = generate_program(
        &PrusaMk3sFrame::default(),
        "zigzag",
        1,
        &Settings::default(),
        &SettingsOverrides::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ToolpathError::UnknownMode(_)));
}

#[test]
fn test_framed_program_order() {
    let program = generate_program(
        &PrusaMk3sFrame::default(),
        "line",
        1,
        &Settings::default(),
        &SettingsOverrides::default(),
    )
    .unwrap();

    let header = program.find("; generated by ExtrudeKit").unwrap();
    let body = program.find("; printing line start id:0 copy 0").unwrap();
    let park = program.find("; park").unwrap();
    assert!(header < body && body < park);
    assert!(program.ends_with("M73 Q100 S0\n"));
}

#[test]
fn test_bare_frame_is_body_only() {
    let base = Settings::default();
    let none = SettingsOverrides::default();
    assert_eq!(
        generate_program(&BareFrame, "plane", 2, &base, &none).unwrap(),
        generate("plane", 2, &base, &none).unwrap()
    );
}

#[test]
fn test_overrides_do_not_leak_between_calls() {
    let base = Settings::default();
    let hopped = generate("line", 1, &base, &overrides(&["zhopEnable=false"])).unwrap();
    let plain = generate("line", 1, &base, &SettingsOverrides::default()).unwrap();
    assert!(!hopped.contains("Z hop"));
    assert!(plain.contains("Z hop"));
    assert!(base.zhop_enable);
}

#[test]
fn test_sessions_are_independent() {
    let base = Settings::default();
    let none = SettingsOverrides::default();
    let first = generate("line", 3, &base, &none).unwrap();
    let _ = generate("plane", 1, &base, &none).unwrap();
    let again = generate("line", 3, &base, &none).unwrap();
    assert_eq!(first, again);

    let handles: Vec<_> = (1..=4)
        .map(|iteration| {
            let base = base.clone();
            std::thread::spawn(move || {
                generate("plane", iteration, &base, &SettingsOverrides::default()).unwrap()
            })
        })
        .collect();
    for (index, handle) in handles.into_iter().enumerate() {
        let iteration = index as u32 + 1;
        let threaded = handle.join().unwrap();
        assert_eq!(threaded, generate("plane", iteration, &base, &none).unwrap());
    }
}

#[test]
fn test_extrusion_matches_path_length() {
    let settings = Settings::default();
    let session = Session::new(&settings, &SettingsOverrides::default()).unwrap();
    let output = session.run(PatternMode::Plane, 1).unwrap();

    let expected = settings.anchor_ext_ratio * settings.ext_mult * output.stats.print_distance;
    assert!((output.stats.filament_used - expected).abs() < 1e-9);

    let emitted: f64 = output
        .body
        .lines()
        .filter(|l| l.starts_with("G1 X"))
        .filter_map(|l| l.split_whitespace().find(|w| w.starts_with('E')))
        .map(|w| w[1..].parse::<f64>().unwrap())
        .sum();
    let moves = output.stats.print_moves as f64;
    assert!((emitted - expected).abs() <= moves * 0.5e-5 + 1e-9);
}

#[test]
fn test_writer_state_after_line() {
    let settings = Settings::default();
    let mut writer = GcodeWriter::new(&settings);
    PatternMode::Line.generate(&mut writer, 1).unwrap();
    let state = writer.state();
    assert!(state.retracted);
    assert_eq!(state.z, 0.2);
}
