//! Configuração imutável de uma execução, montada uma única vez a partir da CLI.
//!
//! A struct [`StatusConfig`] reúne tudo o que o tradutor de status e o cliente
//! de entrega precisam. Nenhum código fora de `main` lê variáveis de ambiente;
//! o clap já resolveu flags e `ZIPLINEE_*` antes de chegarmos aqui.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{Cli, LogFormat};
use crate::retry::RetryPolicy;

/// Configuração de nível superior para uma execução.
#[derive(Debug, Clone)]
pub struct StatusConfig {
    /// Origem do repositório git (ex.: `bitbucket.org`).
    pub git_source: String,
    /// Dono e nome do repositório (ex.: `acme/api`).
    pub repo_fullname: String,
    /// Hash do commit que recebe o status.
    pub revision: String,
    /// Status calculado pelo pipeline.
    pub build_status: String,
    /// Status declarado no manifesto; tem precedência quando presente.
    pub status_override: Option<String>,
    /// URL base do servidor de CI, como recebida.
    pub ci_base_url: String,
    pub build_id: String,
    pub build_version: String,
    pub release_name: Option<String>,
    pub release_action: Option<String>,
    /// Caminho do arquivo JSON com as credenciais injetadas.
    pub credentials_path: PathBuf,
    pub log_format: LogFormat,
    pub retry: RetryPolicy,
}

// Flags opcionais vindas de variáveis de ambiente vazias contam como ausentes.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl StatusConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let retry = RetryPolicy {
            max_attempts: cli.max_attempts,
            base_delay: Duration::from_millis(cli.retry_base_delay_ms),
            ..RetryPolicy::default()
        };

        Self {
            git_source: cli.git_repo_source,
            repo_fullname: cli.git_repo_fullname,
            revision: cli.git_revision,
            build_status: cli.build_status,
            status_override: non_empty(cli.status_override),
            ci_base_url: cli.ci_base_url,
            build_id: cli.build_id,
            build_version: cli.build_version,
            release_name: non_empty(cli.release_name),
            release_action: non_empty(cli.release_action),
            credentials_path: cli.credentials_path,
            log_format: cli.log_format,
            retry,
        }
    }
}
