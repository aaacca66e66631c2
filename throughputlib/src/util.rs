use std::error::Error;
use std::fs;
use regex::Regex;

pub const FIXTURES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata");

pub struct TestCasePaths {
    pub name: String,
    pub config: String,
    pub output: String,
}

/// Finds every `output-<case>.csv` fixture and its matching `parameters-<case>.json`, sorted by
/// case name
pub fn get_cases() -> Result<Vec<TestCasePaths>, Box<dyn Error>> {
    let mut out = Vec::new();
    let output_pattern = Regex::new(r"^output-(?P<case>[0-9a-zA-Z_]+)\.csv$")?;
    let mut names = Vec::new();
    for entry in fs::read_dir(FIXTURES_PATH)? {
        let file_name = entry?.file_name().into_string().map_err(|e| format!("Can't convert OS string ({e:?}) to standard string"))?;
        if output_pattern.is_match(&file_name) {
            names.push(file_name);
        }
    }
    names.sort();
    for file_name in names {
        let tokens = output_pattern.captures(&file_name).ok_or("Couldn't parse the file name".to_string())?;
        let case = tokens.name("case").ok_or("Couldn't get the case from the output file name".to_string())?.as_str();
        out.push(TestCasePaths {
            name: case.to_string(),
            config: format!("{FIXTURES_PATH}/parameters-{case}.json"),
            output: format!("{FIXTURES_PATH}/{file_name}"),
        })
    }
    Ok(out)
}
