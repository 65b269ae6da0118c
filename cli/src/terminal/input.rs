use std::io::{self, BufRead, Write};
use std::path::Path;

/// Asks on the terminal whether `path` may be overwritten. Pressing Enter
/// keeps the file.
pub fn confirm_overwrite(path: &Path) -> io::Result<bool> {
    let stdin = io::stdin();
    confirm_with(
        &format!("Overwrite output file {}? (y/N) ", path.display()),
        false,
        &mut stdin.lock(),
        &mut io::stderr(),
    )
}

/// Repeats `prompt` until the answer is yes, no or empty. End of input
/// counts as an empty answer.
pub fn confirm_with<R: BufRead, W: Write>(
    prompt: &str,
    default_confirm: bool,
    reader: &mut R,
    writer: &mut W,
) -> io::Result<bool> {
    loop {
        write!(writer, "{prompt}")?;
        writer.flush()?;

        let mut response = String::new();
        if reader.read_line(&mut response)? == 0 {
            return Ok(default_confirm);
        }

        match response.trim().to_lowercase().as_str() {
            "" => return Ok(default_confirm),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(
                writer,
                "Invalid input. Please enter 'y', 'n', or just press Enter to not overwrite."
            )?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(input: &str) -> (bool, String) {
        let mut reader = input.as_bytes();
        let mut output = Vec::new();
        let confirmed = confirm_with("Overwrite? ", false, &mut reader, &mut output).unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_confirm_overwrite_answers() {
        assert!(answer("y\n").0);
        assert!(answer("YES\n").0);
        assert!(!answer("n\n").0);
        assert!(!answer("\n").0);
        assert!(!answer("").0);
    }

    #[test]
    fn test_confirm_overwrite_reprompts() {
        let (confirmed, output) = answer("maybe\nyes\n");
        assert!(confirmed);
        assert_eq!(output.matches("Overwrite? ").count(), 2);
        assert!(output.contains("Invalid input"));
    }
}
