use std::ffi;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("file contains nil")]
    FileContainsNil,
}

pub struct Resources {
    root_path: PathBuf,
}

impl Resources {
    pub fn from_dir_path(root_path: &Path) -> Resources {
        Resources {
            root_path: root_path.into(),
        }
    }

    /// Loads a shader source file as a nul-terminated string. GL wants the
    /// terminator, so a source with an interior nul byte is rejected.
    pub fn load_cstring(&self, resource_name: &str) -> Result<ffi::CString, ResError> {
        let mut file = fs::File::open(resource_name_to_path(&self.root_path, resource_name))?;

        let mut buffer: Vec<u8> = Vec::with_capacity(file.metadata()?.len() as usize + 1);
        file.read_to_end(&mut buffer)?;

        if buffer.iter().any(|i| *i == 0) {
            return Err(ResError::FileContainsNil);
        }

        Ok(unsafe { ffi::CString::from_vec_unchecked(buffer) })
    }
}

fn resource_name_to_path(root_dir: &Path, location: &str) -> PathBuf {
    let mut path: PathBuf = root_dir.into();
    for part in location.split('/') {
        path = path.join(part);
    }
    path
}
