//! Interface de linha de comando baseada em clap.
//!
//! Cada flag também pode vir da variável de ambiente `ZIPLINEE_*` que o
//! servidor de CI injeta no container da extensão.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Reports the status of a Ziplinee build to a Bitbucket commit.
#[derive(Debug, Parser)]
#[command(name = "bitbucket-status", version, about)]
pub struct Cli {
    /// The source of the git repository, bitbucket.org in this case.
    #[arg(long, env = "ZIPLINEE_GIT_SOURCE")]
    pub git_repo_source: String,

    /// The owner and repo name of the Bitbucket repository.
    #[arg(long, env = "ZIPLINEE_GIT_FULLNAME")]
    pub git_repo_fullname: String,

    /// The hash of the revision to set build status for.
    #[arg(long, env = "ZIPLINEE_GIT_REVISION")]
    pub git_revision: String,

    /// The current build status of the Ziplinee pipeline.
    #[arg(long = "ziplinee-build-status", env = "ZIPLINEE_BUILD_STATUS")]
    pub build_status: String,

    /// Allow status property in manifest to override the actual build status.
    #[arg(long, env = "ZIPLINEE_EXTENSION_STATUS")]
    pub status_override: Option<String>,

    /// The base url of the ci server.
    #[arg(long = "ziplinee-ci-server-base-url", env = "ZIPLINEE_CI_SERVER_BASE_URL")]
    pub ci_base_url: String,

    /// The build id of this particular build.
    #[arg(long = "ziplinee-build-id", env = "ZIPLINEE_BUILD_ID")]
    pub build_id: String,

    /// The current build version of the Ziplinee pipeline.
    #[arg(long = "ziplinee-build-version", env = "ZIPLINEE_BUILD_VERSION")]
    pub build_version: String,

    /// Name of the release section, automatically set by Ziplinee CI.
    #[arg(long, env = "ZIPLINEE_RELEASE_NAME")]
    pub release_name: Option<String>,

    /// Name of the release action, automatically set by Ziplinee CI.
    #[arg(long, env = "ZIPLINEE_RELEASE_ACTION")]
    pub release_action: Option<String>,

    /// Path to file with Bitbucket api token credentials injected by the CI server.
    #[arg(
        long,
        env = "ZIPLINEE_CREDENTIALS_PATH",
        default_value = "/credentials/bitbucket_api_token.json"
    )]
    pub credentials_path: PathBuf,

    /// Formato das linhas de log.
    #[arg(long, env = "ZIPLINEE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Plaintext)]
    pub log_format: LogFormat,

    /// Número máximo de tentativas de entrega.
    #[arg(long, env = "ZIPLINEE_MAX_ATTEMPTS", default_value_t = 3)]
    pub max_attempts: u32,

    /// Atraso base em milissegundos para o backoff exponencial.
    #[arg(long, env = "ZIPLINEE_RETRY_BASE_DELAY_MS", default_value_t = 2000)]
    pub retry_base_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Texto simples, sem cores.
    Plaintext,
    /// Texto com cores ANSI, para terminais.
    Console,
    /// Uma linha JSON por evento.
    Json,
}
