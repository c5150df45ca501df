/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use std::fs;
use std::process::Command;

/// Dynamically collects test cases from a given directory. Expected outputs
/// are optional, since failing cases have none.
fn collect_test_cases(subfolder: &str) -> Vec<(String, Option<String>)> {
	let dir_path = format!("tests/test_data/{}", subfolder);

	let mut test_cases = vec![];

	if let Ok(entries) = fs::read_dir(&dir_path) {
		let mut inputs = vec![];
		let mut outputs = vec![];

		for entry in entries.flatten() {
			let file_name =
				entry.file_name().into_string().unwrap_or_default();
			if file_name.ends_with("_in.json") {
				inputs.push(file_name);
			} else if file_name.ends_with("_out.txt") {
				outputs.push(file_name);
			}
		}

		inputs.sort();

		// Pair inputs with corresponding outputs
		for input_file in inputs {
			let output_file = input_file.replace("_in.json", "_out.txt");
			if outputs.contains(&output_file) {
				test_cases.push((input_file, Some(output_file)));
			} else {
				test_cases.push((input_file, None));
			}
		}
	}

	assert!(!test_cases.is_empty(), "no test cases in {}", dir_path);
	test_cases
}

const MARCH: [&str; 4] = ["-b", "2024-03-01", "-e", "2024-03-31"];

#[test]
fn test_integration_berlin() {
	let test_cases = collect_test_cases("berlin");
	let args = [MARCH.to_vec(), vec!["-p", "BER1"]].concat();
	execute("berlin", test_cases, true, "berlin", args);
}

#[test]
fn test_integration_hamburg() {
	let test_cases = collect_test_cases("hamburg");
	let args = [MARCH.to_vec(), vec!["-p", "HAM1"]].concat();
	execute("hamburg", test_cases, true, "hamburg", args);
}

#[test]
fn test_integration_empty() {
	let test_cases = collect_test_cases("empty");
	let args = [MARCH.to_vec(), vec!["-p", "BER1"]].concat();
	execute("empty", test_cases, true, "berlin", args);
}

#[test]
fn test_integration_should_fail() {
	let test_cases = collect_test_cases("failures");
	let args = [MARCH.to_vec(), vec!["-p", "BER1"]].concat();
	execute("failures", test_cases, false, "berlin", args);
}

#[test]
fn test_integration_reversed_window() {
	let test_cases = collect_test_cases("berlin");
	execute(
		"berlin",
		test_cases,
		false,
		"berlin",
		vec!["-b", "2024-03-31", "-e", "2024-03-01", "-p", "BER1"],
	);
}

#[test]
fn test_integration_tsv() {
	let output = run(
		"hamburg",
		"netting_in.json",
		"hamburg",
		[MARCH.to_vec(), vec!["-p", "HAM1", "--tsv"]].concat(),
	);
	assert!(output.status.success());

	let stdout = String::from_utf8_lossy(&output.stdout);
	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(lines[0], "# City Tax Report");
	assert_eq!(lines[3], "City Tax Amount\tCorrected # of Guests\tLabel");
	assert_eq!(
		lines[4..].to_vec(),
		vec![
			"0.25\t3\t",
			"3.00\t2\t<150 Euro",
			"5.00\t3\t<250 Euro",
			"7.00\t1\t<350 Euro",
		]
	);
}

fn run(
	subfolder: &str,
	input_file: &str,
	cmd: &str,
	args: Vec<&str>,
) -> std::process::Output {
	let loc = format!("{}/{}/{}", "tests/test_data", subfolder, input_file);

	let all_args =
		[vec!["run", "--", cmd, "-f", loc.as_str()], args].concat();

	Command::new("cargo")
		.args(all_args)
		.output()
		.expect("Failed to execute process")
}

fn execute(
	subfolder: &str,
	test_cases: Vec<(String, Option<String>)>,
	should_succeed: bool,
	cmd: &str,
	args: Vec<&str>,
) {
	for (input_file, expected_output_file) in test_cases {
		println!("running for {}...", input_file);

		let output = run(subfolder, &input_file, cmd, args.clone());

		if !should_succeed {
			assert!(
				!output.status.success(),
				"{} unexpectedly succeeded!",
				input_file
			);
			continue;
		}

		assert!(
			output.status.success(),
			"{} failed processing: {}",
			input_file,
			String::from_utf8_lossy(&output.stderr)
		);

		// the execution time differs on every run
		let stdout: Vec<String> = String::from_utf8_lossy(&output.stdout)
			.lines()
			.filter(|l| !l.starts_with("Executed: "))
			.map(str::to_string)
			.collect();
		let stdout = stdout.join("\n");

		let expected_output_file = expected_output_file
			.unwrap_or_else(|| panic!("no expected output for {}", input_file));
		let expected_output = fs::read_to_string(format!(
			"{}/{}/{}",
			"tests/test_data", subfolder, expected_output_file
		))
		.expect("Failed to read expected output file");

		assert_eq!(
			stdout.trim(),
			expected_output.trim(),
			"Output did not match for {}; expected:\n{}\ngot:\n{}",
			input_file,
			expected_output.trim(),
			stdout.trim()
		);
	}
}
