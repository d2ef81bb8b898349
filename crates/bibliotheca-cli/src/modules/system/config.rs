use std::fs;
use std::path::{Path, PathBuf};

use super::types::{AuthConfig, CliConfig, CliContext};
use crate::cli_args::{ConfigArgs, ConfigCommand, SetContextArgs};
use crate::{DEFAULT_ADDR, DEFAULT_AUTHORITY, DEFAULT_CONTEXT, DEFAULT_TENANT};

pub(crate) fn handle_config_command(
    args: ConfigArgs,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::SetContext(args) => {
            let name = args.name.clone();
            let entry = config
                .contexts
                .entry(name.clone())
                .or_insert_with(|| CliContext {
                    addr: DEFAULT_ADDR.to_string(),
                    auth: None,
                });
            apply_context_args(entry, args)?;
            config.current_context = Some(name);
        }
        ConfigCommand::UseContext(args) => {
            if !config.contexts.contains_key(&args.name) {
                anyhow::bail!("context not found: {}", args.name);
            }
            config.current_context = Some(args.name);
        }
        ConfigCommand::CurrentContext => {
            if let Some(current) = config.current_context.clone() {
                println!("{current}");
            }
        }
        ConfigCommand::GetContexts => {
            let mut names: Vec<_> = config.contexts.keys().cloned().collect();
            names.sort();
            for name in names {
                let marker = if config.current_context.as_ref() == Some(&name) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {name}");
            }
        }
    }
    Ok(())
}

fn apply_context_args(entry: &mut CliContext, args: SetContextArgs) -> anyhow::Result<()> {
    if let Some(addr) = args.addr {
        entry.addr = addr;
    }
    let touches_auth = args.client_id.is_some()
        || args.authority.is_some()
        || args.tenant.is_some()
        || args.redirect_uri.is_some()
        || args.resource.is_some();
    if !touches_auth {
        return Ok(());
    }

    let mut auth = match entry.auth.take() {
        Some(auth) => auth,
        None => AuthConfig {
            authority: DEFAULT_AUTHORITY.to_string(),
            tenant: DEFAULT_TENANT.to_string(),
            client_id: args
                .client_id
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--client-id is required to configure sign-in"))?,
            redirect_uri: format!("{}/login", entry.addr.trim_end_matches('/')),
            resource: None,
        },
    };
    if let Some(authority) = args.authority {
        auth.authority = authority;
    }
    if let Some(tenant) = args.tenant {
        auth.tenant = tenant;
    }
    if let Some(client_id) = args.client_id {
        auth.client_id = client_id;
    }
    if let Some(redirect_uri) = args.redirect_uri {
        auth.redirect_uri = redirect_uri;
    }
    if let Some(resource) = args.resource {
        auth.resource = Some(resource);
    }
    entry.auth = Some(auth);
    Ok(())
}

fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("HOME is not set"))?;
    Ok(Path::new(&home).join(".bibliotheca").join("config.json"))
}

pub(crate) fn load_config() -> anyhow::Result<CliConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

pub(crate) fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

pub(crate) fn resolve_context_name(context_arg: Option<String>, config: &CliConfig) -> String {
    context_arg
        .or_else(|| config.current_context.clone())
        .unwrap_or_else(|| DEFAULT_CONTEXT.to_string())
}

pub(crate) fn ensure_secure_addr(addr: &str, allow_insecure: bool) -> anyhow::Result<()> {
    if addr.starts_with("http://") && !allow_insecure {
        anyhow::bail!("refusing to use http:// without --insecure");
    }
    Ok(())
}
