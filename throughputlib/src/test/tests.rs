use std::error::Error;
use std::fs;
use crate::config::ModelConfig;
use crate::io::{write_points, OutputFormat};
use crate::model::ThroughputModel;
use crate::util::get_cases;

fn render(config: &ModelConfig) -> Result<String, Box<dyn Error>> {
    let model = ThroughputModel::new(&config.parameters)?;
    let mut out = Vec::new();
    write_points(&mut out, model.sweep(&config.sweep)?, OutputFormat::Csv)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn run_all_fixtures() -> Result<(), Box<dyn Error>> {
    let cases = get_cases()?;
    assert!(cases.len() >= 3);
    for case in cases {
        println!("Running test for {}", case.name);
        let config = ModelConfig::from_path(&case.config)?;
        let expected = fs::read_to_string(&case.output)?;
        let actual = render(&config)?;
        assert_eq!(actual.lines().count() as u64, config.sweep.point_count());
        assert_eq!(actual, expected, "Output differs for {}", case.name);
    }
    Ok(())
}

#[test]
fn repeated_runs_are_identical() -> Result<(), Box<dyn Error>> {
    let config = ModelConfig::default();
    assert_eq!(render(&config)?, render(&config)?);
    Ok(())
}

#[test]
fn rejected_configuration_produces_no_output() {
    let mut config = ModelConfig::default();
    config.parameters.l2_cycles = 2;
    assert!(render(&config).is_err());
}
