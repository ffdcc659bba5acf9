//! End-to-end pipeline tests with fake GDAL tools.

use std::fs;
use std::path::{Path, PathBuf};

use fim_common::{FimError, OutputFormat};
use mosaic::{FimPipeline, FimRequest};
use test_utils::{
    dir_entries, sample_fim_paths, temp_test_dir, vrt_sources, write_control_file,
    write_raw_control_file, write_sample_control_file, FakeAvailability, RecordingTools,
    ToolCall,
};

fn request(controls: &Path, output: &Path, format: OutputFormat, with_domain: bool) -> FimRequest {
    FimRequest {
        library: "/lib".to_string(),
        controls: controls.to_path_buf(),
        output: output.to_string_lossy().into_owned(),
        format,
        with_domain,
    }
}

fn strings(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}

fn assert_no_staged_files(tools: &RecordingTools) {
    for staged in tools.staged_paths() {
        assert!(!staged.exists(), "{} left behind", staged.display());
    }
}

// ============================================================================
// VRT output
// ============================================================================

#[test]
fn test_two_row_control_file_to_vrt() {
    let dir = temp_test_dir();
    let controls = write_sample_control_file(dir.path());
    let output = dir.path().join("fim.vrt");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    let result = FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Vrt, false))
        .unwrap();

    let expected = strings(&sample_fim_paths(Path::new("/lib")));
    assert_eq!(
        expected,
        vec![
            "/lib/2821866/z_nd/f_10283.tif",
            "/lib/2821867/z_53_5/f_11199.tif"
        ]
    );

    match &tools.build_calls()[0] {
        ToolCall::BuildMosaic { sources, .. } => assert_eq!(sources, &expected),
        other => panic!("Expected BuildMosaic, got {:?}", other),
    }
    assert_eq!(vrt_sources(&fs::read_to_string(&output).unwrap()), expected);
    assert_eq!(result.path, output);
    assert_eq!(result.format, OutputFormat::Vrt);
    assert_eq!(result.tiles, 2);
    assert_eq!(result.domain_tiles, 0);
}

#[test]
fn test_vrt_leaves_no_temp_files() {
    let dir = temp_test_dir();
    let controls = write_sample_control_file(dir.path());
    let output = dir.path().join("fim.vrt");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Vrt, false))
        .unwrap();

    assert_no_staged_files(&tools);
    assert_eq!(dir_entries(dir.path()), vec![controls, output]);
}

#[test]
fn test_vrt_replaces_existing_output() {
    let dir = temp_test_dir();
    let controls = write_sample_control_file(dir.path());
    let output = dir.path().join("fim.vrt");
    fs::write(&output, "stale").unwrap();
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Vrt, false))
        .unwrap();

    assert_eq!(vrt_sources(&fs::read_to_string(&output).unwrap()).len(), 2);
}

#[test]
fn test_domain_tiles_layered_first() {
    let dir = temp_test_dir();
    let controls = write_sample_control_file(dir.path());
    let output = dir.path().join("fim.vrt");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    let result = FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Vrt, true))
        .unwrap();

    assert_eq!(result.tiles, 4);
    assert_eq!(result.domain_tiles, 2);
    assert_eq!(
        vrt_sources(&fs::read_to_string(&output).unwrap()),
        vec![
            "/lib/2821866/domain.tif",
            "/lib/2821867/domain.tif",
            "/lib/2821866/z_nd/f_10283.tif",
            "/lib/2821867/z_53_5/f_11199.tif",
        ]
    );
}

#[test]
fn test_vsi_library_paths() {
    let dir = temp_test_dir();
    let controls = write_sample_control_file(dir.path());
    let output = dir.path().join("fim.vrt");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    let mut req = request(&controls, &output, OutputFormat::Vrt, false);
    req.library = "/vsis3/fim-bucket/library".to_string();
    FimPipeline::new(&tools, &availability).run(&req).unwrap();

    assert_eq!(
        vrt_sources(&fs::read_to_string(&output).unwrap()),
        vec![
            "/vsis3/fim-bucket/library/2821866/z_nd/f_10283.tif",
            "/vsis3/fim-bucket/library/2821867/z_53_5/f_11199.tif",
        ]
    );
}

// ============================================================================
// Materialized output
// ============================================================================

#[test]
fn test_cog_output_is_converted() {
    let dir = temp_test_dir();
    let controls = write_sample_control_file(dir.path());
    let output = dir.path().join("fim.tif");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Cog, false))
        .unwrap();

    let converts = tools.convert_calls();
    assert_eq!(converts.len(), 1);
    match &converts[0] {
        ToolCall::Convert {
            format,
            output: target,
            ..
        } => {
            assert_eq!(*format, OutputFormat::Cog);
            assert_eq!(target, &output);
        }
        other => panic!("Expected Convert, got {:?}", other),
    }

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("COG\n"));
    assert_eq!(vrt_sources(&written).len(), 2);
    assert_no_staged_files(&tools);
    assert_eq!(dir_entries(dir.path()), vec![controls, output]);
}

#[test]
fn test_gtiff_reads_staged_vrt() {
    let dir = temp_test_dir();
    let controls = write_sample_control_file(dir.path());
    let output = dir.path().join("fim.tif");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::GTiff, false))
        .unwrap();

    let calls = tools.calls();
    let staged = match &calls[0] {
        ToolCall::BuildMosaic { output, .. } => output.clone(),
        other => panic!("Expected BuildMosaic, got {:?}", other),
    };
    match &calls[1] {
        ToolCall::Convert { input, format, .. } => {
            assert_eq!(input, &staged);
            assert_eq!(*format, OutputFormat::GTiff);
        }
        other => panic!("Expected Convert, got {:?}", other),
    }
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_build_failure_surfaces_diagnostic() {
    let dir = temp_test_dir();
    let controls = write_sample_control_file(dir.path());
    let output = dir.path().join("fim.vrt");
    let tools = RecordingTools::failing_build("ERROR 4: /lib/2821866/z_nd/f_10283.tif: No such file");
    let availability = FakeAvailability::all_available();

    let err = FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Vrt, false))
        .unwrap_err();

    match &err {
        FimError::ExternalTool { tool, stderr, .. } => {
            assert_eq!(tool, "gdalbuildvrt");
            assert!(stderr.contains("No such file"));
        }
        other => panic!("Expected ExternalTool, got {:?}", other),
    }
    assert!(!output.exists());
    assert_no_staged_files(&tools);
    assert_eq!(dir_entries(dir.path()), vec![controls]);
}

#[test]
fn test_convert_failure_may_leave_partial_output() {
    let dir = temp_test_dir();
    let controls = write_sample_control_file(dir.path());
    let output = dir.path().join("fim.tif");
    let tools = RecordingTools::failing_convert("ERROR 1: disk full", true);
    let availability = FakeAvailability::all_available();

    let err = FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Cog, false))
        .unwrap_err();

    assert!(matches!(err, FimError::ExternalTool { .. }), "got {:?}", err);
    assert_eq!(fs::read_to_string(&output).unwrap(), "PARTIAL");
    assert_no_staged_files(&tools);
}

#[test]
fn test_missing_tool_checked_before_controls() {
    let dir = temp_test_dir();
    let controls = dir.path().join("does-not-exist.csv");
    let output = dir.path().join("fim.vrt");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::missing(&["gdalbuildvrt"]);

    let err = FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Vrt, false))
        .unwrap_err();

    match err {
        FimError::MissingTool { tool } => assert_eq!(tool, "gdalbuildvrt"),
        other => panic!("Expected MissingTool, got {:?}", other),
    }
    assert!(tools.calls().is_empty());
}

#[test]
fn test_header_only_rejected_before_tools_run() {
    let dir = temp_test_dir();
    let controls = write_raw_control_file(dir.path(), "controls.csv", "reach_id,flow,control_stage\n");
    let output = dir.path().join("fim.vrt");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    let err = FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Vrt, false))
        .unwrap_err();

    assert!(matches!(err, FimError::Shape { .. }), "got {:?}", err);
    assert!(tools.calls().is_empty());
    assert!(!output.exists());
}

#[test]
fn test_short_row_rejected_before_tools_run() {
    let dir = temp_test_dir();
    let controls = write_control_file(
        dir.path(),
        "controls.csv",
        &[&["2821866", "10283", "nd"], &["2821867", "11199"]],
    );
    let output = dir.path().join("fim.vrt");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    let err = FimPipeline::new(&tools, &availability)
        .run(&request(&controls, &output, OutputFormat::Vrt, false))
        .unwrap_err();

    assert!(matches!(err, FimError::Shape { .. }), "got {:?}", err);
    assert!(tools.calls().is_empty());
}

#[test]
fn test_unreadable_controls_is_read_error() {
    let dir = temp_test_dir();
    let output = dir.path().join("fim.vrt");
    let tools = RecordingTools::new();
    let availability = FakeAvailability::all_available();

    let err = FimPipeline::new(&tools, &availability)
        .run(&request(
            &dir.path().join("missing.csv"),
            &output,
            OutputFormat::Vrt,
            false,
        ))
        .unwrap_err();

    assert!(matches!(err, FimError::Read { .. }), "got {:?}", err);
}
