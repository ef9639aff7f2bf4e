use libtest_mimic::{Arguments, Failed, Trial};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sweepclip::{area, boolean_op, BooleanOp, MultiPolygon};

/// One case, read from a YAML file under `tests/regression`.
///
/// Every assertion is optional; a case with none of them just checks that
/// the operation succeeds.
#[derive(Serialize, Deserialize, Debug)]
struct RegressionCaseDeclaration {
    subject: MultiPolygon,
    clipping: MultiPolygon,
    op: BooleanOp,
    /// The exact expected output.
    expected: Option<MultiPolygon>,
    expected_area: Option<f64>,
    expected_polygons: Option<usize>,
    /// A fragment of the expected error message.
    error: Option<String>,
}

fn main() {
    let args = Arguments::from_args();
    let tests = regression_tests();

    libtest_mimic::run(&args, tests).exit();
}

fn regression_tests() -> Vec<Trial> {
    let ws = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let file_paths = glob::glob(&format!("{ws}/tests/regression/**/*.yml")).unwrap();

    file_paths
        .into_iter()
        .map(|p| {
            let p = p.unwrap();
            let name = input_path_base(&p).display().to_string();
            Trial::test(name, || run_regression_test(p))
        })
        .collect()
}

fn input_path_base(input_path: &Path) -> &Path {
    let ws = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let base = format!("{ws}/tests/regression");
    input_path.strip_prefix(base).unwrap()
}

fn run_regression_test(path: PathBuf) -> Result<(), Failed> {
    let input = std::fs::read_to_string(&path).unwrap();
    let case: RegressionCaseDeclaration = serde_yaml::from_str(&input).unwrap();
    let result = boolean_op(case.op, &case.subject, &case.clipping);

    let output = match (result, &case.error) {
        (Err(e), Some(fragment)) if e.to_string().contains(fragment.as_str()) => return Ok(()),
        (Err(e), _) => return Err(format!("unexpected error: {e}").into()),
        (Ok(out), Some(fragment)) => {
            return Err(format!("expected an error containing {fragment:?}, got {out:?}").into())
        }
        (Ok(out), None) => out,
    };

    check_normalized(&output)?;
    if let Some(expected) = &case.expected {
        if &output != expected {
            return Err(format!("expected {expected:?}, got {output:?}").into());
        }
    }
    if let Some(expected) = case.expected_area {
        let actual = area(&output);
        if (actual - expected).abs() > 1e-9 * expected.abs() {
            return Err(format!("expected area {expected}, got {actual}").into());
        }
    }
    if let Some(expected) = case.expected_polygons {
        if output.len() != expected {
            return Err(format!("expected {expected} polygons, got {}", output.len()).into());
        }
    }

    Ok(())
}

/// Checks the shape of the output: closed rings of at least four positions,
/// counter-clockwise exteriors, and clockwise holes.
fn check_normalized(output: &MultiPolygon) -> Result<(), Failed> {
    for polygon in output {
        for (i, ring) in polygon.iter().enumerate() {
            if ring.len() < 4 || ring.first() != ring.last() {
                return Err(format!("bad ring {ring:?}").into());
            }
            let twice_area: f64 = ring
                .windows(2)
                .map(|w| w[0][0] * w[1][1] - w[1][0] * w[0][1])
                .sum();
            let ccw = twice_area > 0.0;
            if ccw != (i == 0) {
                return Err(format!("ring {ring:?} has the wrong orientation").into());
            }
        }
    }
    Ok(())
}
