use crate::cache::TemplateCache;
use crate::compile::{CompileOptions, compile_with};
use crate::error::TemplateError;
use crate::loader::SqlLoader;
use crate::prepared::PreparedQuery;
use crate::template::CompiledTemplate;
use duplex_expr::FunctionRegistry;
use model::ParamMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings for [`SqlBuilder`].
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Root directory for [`SqlBuilder::compile_file`]. `None` disables
    /// file loading.
    pub sql_root: Option<PathBuf>,
    /// Maximum number of cached templates. `None` means unbounded.
    pub cache_capacity: Option<usize>,
    /// When false, every template compiles in static mode.
    pub dynamic_sql: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            sql_root: None,
            cache_capacity: Some(128),
            dynamic_sql: true,
        }
    }
}

/// Facade tying the pieces together: compiles templates with a shared
/// function registry, caches the results, and loads sources from a root
/// directory when one is configured.
pub struct SqlBuilder {
    cache: TemplateCache,
    loader: Option<SqlLoader>,
    options: CompileOptions,
}

impl SqlBuilder {
    pub fn new() -> Self {
        SqlBuilder::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        SqlBuilder::with_functions(config, FunctionRegistry::new())
    }

    /// Builder whose templates see `functions`, typically the builtin set
    /// extended with caller-registered ones.
    pub fn with_functions(config: BuilderConfig, functions: FunctionRegistry) -> Self {
        let cache = match config.cache_capacity {
            Some(capacity) => TemplateCache::with_capacity(capacity),
            None => TemplateCache::new(),
        };
        SqlBuilder {
            cache,
            loader: config.sql_root.map(SqlLoader::new),
            options: CompileOptions {
                dynamic: config.dynamic_sql,
                functions: Arc::new(functions),
            },
        }
    }

    /// Compiles `source`, reusing the cached template when the same source
    /// was compiled before under the same declarations and mode.
    pub fn compile(
        &self,
        source: &str,
        declared: &[&str],
    ) -> Result<Arc<CompiledTemplate>, TemplateError> {
        let key = cache_key(source, declared, self.options.dynamic);
        self.cache
            .get_or_compile(&key, || compile_with(source, declared, &self.options))
    }

    /// Loads `path` below the configured root and compiles it.
    pub fn compile_file(
        &self,
        path: impl AsRef<Path>,
        declared: &[&str],
    ) -> Result<Arc<CompiledTemplate>, TemplateError> {
        let loader = self.loader.as_ref().ok_or(TemplateError::MissingRoot)?;
        let source = loader.load(path)?;
        self.compile(&source, declared)
    }

    /// Compile-and-prepare convenience for one-shot queries.
    pub fn prepare(
        &self,
        source: &str,
        declared: &[&str],
        params: &ParamMap,
    ) -> Result<PreparedQuery, TemplateError> {
        let template = self.compile(source, declared)?;
        template.prepare(params)
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.options.functions
    }
}

impl Default for SqlBuilder {
    fn default() -> Self {
        SqlBuilder::new()
    }
}

/// The same source compiled under different declarations or a different
/// mode must not collide in the cache.
fn cache_key(source: &str, declared: &[&str], dynamic: bool) -> String {
    let mut names: Vec<&str> = declared.to_vec();
    names.sort_unstable();
    let mut key = String::with_capacity(source.len() + 32);
    key.push(if dynamic { 'd' } else { 's' });
    key.push('|');
    for name in names {
        key.push_str(name);
        key.push(',');
    }
    key.push('|');
    key.push_str(source);
    key
}
