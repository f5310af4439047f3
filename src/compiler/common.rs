use std::{fs, path::Path};

use super::error::Error;

/// Written to the program path when no program exists yet.
pub const DEFAULT_PROGRAM: &str = "int a = -50 ;\nint b = a + 10;\nint c = b * 2 + 5;\n";

/// Read the whole program, creating it with [`DEFAULT_PROGRAM`] if it does not exist.
pub fn read_program<P>(filename: P) -> Result<String, Error>
where
    P: AsRef<Path>,
{
    let path = filename.as_ref();
    if !path.exists() {
        fs::write(path, DEFAULT_PROGRAM)
            .map_err(|err| Error::Io(format!("Cannot create {}: {}", path.display(), err)))?;
    }

    fs::read_to_string(path)
        .map_err(|err| Error::Io(format!("Cannot open source file {}: {}", path.display(), err)))
}
