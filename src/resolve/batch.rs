use crate::foundation::error::{SceneError, SceneResult};

/// Options for resolving one compiled template against many data environments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BatchOpts {
    /// Enable parallel resolution.
    pub parallel: bool,
    /// Optional rayon worker count; `None` uses rayon's default.
    pub threads: Option<usize>,
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> SceneResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SceneError::config("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SceneError::config(format!("failed to build rayon thread pool: {e}")))
}
