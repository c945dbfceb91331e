//! Writing a generated module to disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::module::Generated;

const PACKAGE_INIT: &str = "__init__.py";

/// Files touched by [`write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub models: PathBuf,
    /// Set only when a new `__init__.py` was created.
    pub package_init: Option<PathBuf>,
}

/// Write `generated` into `dir`, creating the directory if needed.
///
/// The models file is always overwritten. An existing `__init__.py` is left
/// untouched.
pub fn write(dir: &Path, config: &Config, generated: &Generated) -> io::Result<Written> {
    fs::create_dir_all(dir)?;

    let models = dir.join(&config.models_file);
    fs::write(&models, &generated.source)?;
    info!(path = %models.display(), "wrote models module");

    let mut package_init = None;
    if config.create_py_package_init_file {
        let init = dir.join(PACKAGE_INIT);
        if init.exists() {
            debug!(path = %init.display(), "package init already present");
        } else {
            fs::write(&init, "")?;
            info!(path = %init.display(), "created package init");
            package_init = Some(init);
        }
    }

    Ok(Written {
        models,
        package_init,
    })
}
