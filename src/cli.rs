//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{resolve_hosts_path, HostmanPaths};
use crate::domain;
use crate::entry::{EntryId, EntryKind, HostsEntry};
use crate::hostfile::HostFile;
use crate::hosts::HostsManager;
use crate::store;

#[derive(Parser)]
#[command(name = "hostman")]
#[command(about = "Edit the hosts file as groups of toggleable entries")]
pub struct Cli {
    /// Hosts file to edit (overrides HOSTMAN_HOSTS_FILE and settings)
    #[arg(long, global = true, value_name = "PATH")]
    pub hosts_file: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show groups, hosts and comments with their active state
    Show {
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the hosts file text as it would be saved
    Text,

    /// Toggle a group (by name) or host (by address or domain)
    Toggle { name: String },

    /// Activate a group, or every group with "all"
    Enable { target: String },

    /// Deactivate a group, or every group with "all"
    Disable { target: String },

    /// Switch an exclusive toggle mode on or off
    Mode {
        #[arg(value_enum)]
        kind: ModeKind,
        #[arg(value_enum)]
        state: Switch,
    },

    /// Add an empty group at the end of the file
    AddGroup {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Add a host line with one or more domains
    AddHost {
        ip: String,
        #[arg(required = true, num_args = 1..)]
        domains: Vec<String>,
        /// Add to this group instead of the top level
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Add the host commented out
        #[arg(long)]
        inactive: bool,
        /// Insert at the top of its collection instead of the end
        #[arg(long)]
        top: bool,
    },

    /// Remove a group, host, comment or domain by name
    Remove { name: String },

    /// Move an entry one position (wraps around at either end)
    Move {
        name: String,
        #[arg(value_enum)]
        direction: Direction,
    },

    /// Manage saved hosts file profiles (list, save, load, show, delete)
    Profile {
        #[command(subcommand)]
        cmd: ProfileCmd,
    },

    /// Manage hostman settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    /// Overwrite the hosts file with the default content
    RestoreDefault,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeKind {
    /// Only one group active at a time
    Group,
    /// Only one host active at a time among its siblings
    Host,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Subcommand)]
pub enum ProfileCmd {
    /// List saved profiles
    List,
    /// Save the current hosts file as a profile
    Save { name: String },
    /// Replace the hosts file with a saved profile
    Load { name: String },
    /// Show a saved profile without applying it
    Show {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved profile
    Delete { name: String },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print settings and resolved paths
    Show,
    /// Remember a hosts file to edit by default
    SetHostsFile { path: PathBuf },
    /// Forget the remembered hosts file
    ResetHostsFile,
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let paths = HostmanPaths::default_paths();
    let settings = store::load_settings(&paths)?;
    let hosts_path = resolve_hosts_path(cli.hosts_file.as_deref(), &settings);
    tracing::debug!(hosts_file = %hosts_path.display(), "resolved hosts file");

    match cli.command {
        Commands::Profile { cmd } => cmd_profile(paths, hosts_path, cmd),
        Commands::Config { cmd } => cmd_config(&paths, cli.hosts_file.is_some(), hosts_path, cmd),
        Commands::RestoreDefault => {
            let mut manager = HostsManager::new(paths, &hosts_path, crate::platform::default_text_source());
            manager.restore_default()?;
            println!("Restored default hosts file: {}", hosts_path.display());
            Ok(())
        }
        command => {
            let mut manager = HostsManager::open(paths, hosts_path, crate::platform::default_text_source())?;
            cmd_edit(&mut manager, command)
        }
    }
}

fn cmd_edit(manager: &mut HostsManager, command: Commands) -> Result<()> {
    match command {
        Commands::Show { json } => print_tree(manager.current(), json),
        Commands::Text => {
            print!("{}", manager.current().text());
            Ok(())
        }
        Commands::Toggle { name } => {
            let file = manager.current_mut();
            let id = find_activatable(file, &name)
                .with_context(|| format!("no group or host named '{name}'"))?;
            file.toggle_active_state(id);
            let state = state_label(file, id);
            manager.save()?;
            println!("Toggled {name}: {state}");
            Ok(())
        }
        Commands::Enable { target } => set_groups(manager, &target, true),
        Commands::Disable { target } => set_groups(manager, &target, false),
        Commands::Mode { kind, state } => {
            let enabled = matches!(state, Switch::On);
            let file = manager.current_mut();
            let label = match kind {
                ModeKind::Group => {
                    file.set_exclusive_group_toggle_mode(enabled);
                    "group"
                }
                ModeKind::Host => {
                    file.set_exclusive_host_toggle_mode(enabled);
                    "host"
                }
            };
            manager.save()?;
            let state = if enabled { "on" } else { "off" };
            println!("Exclusive {label} toggle mode: {state}");
            Ok(())
        }
        Commands::AddGroup { name, description } => {
            domain::validate_group_name(&name)?;
            let file = manager.current_mut();
            if file.find(EntryKind::HostGroup, &name).is_some() {
                anyhow::bail!("group '{name}' already exists");
            }
            let group = HostsEntry::host_group(name.as_str())?.with_description(description.as_deref());
            file.add_child(None, group)
                .with_context(|| format!("could not add group '{name}'"))?;
            manager.save()?;
            println!("Added group: {name}");
            Ok(())
        }
        Commands::AddHost {
            ip,
            domains,
            group,
            description,
            inactive,
            top,
        } => {
            domain::validate_ip(&ip)?;
            for d in &domains {
                domain::validate_hostname(d)?;
            }
            let file = manager.current_mut();
            let parent = match &group {
                Some(g) => Some(
                    file.find(EntryKind::HostGroup, g)
                        .with_context(|| format!("group '{g}' not found"))?,
                ),
                None => None,
            };
            let host = HostsEntry::host(ip.as_str(), !inactive)?.with_description(description.as_deref());
            let id = if top {
                file.add_child_to_top(parent, host)
            } else {
                file.add_child(parent, host)
            }
            .with_context(|| format!("could not add host '{ip}'"))?;
            for d in &domains {
                file.add_child(Some(id), HostsEntry::domain(d.as_str())?);
            }
            manager.save()?;
            println!("Added host: {ip}\t{}", domains.join(" "));
            Ok(())
        }
        Commands::Remove { name } => {
            let file = manager.current_mut();
            let id = find_removable(file, &name)
                .with_context(|| format!("no entry named '{name}'"))?;
            let kind = file.get(id).map(HostsEntry::kind);
            file.delete(id);
            manager.save()?;
            match kind {
                Some(kind) => println!("Removed {}: {name}", kind_label(kind)),
                None => println!("Removed: {name}"),
            }
            Ok(())
        }
        Commands::Move { name, direction } => {
            let file = manager.current_mut();
            let id = find_entry(file, &name).with_context(|| format!("no entry named '{name}'"))?;
            let position = match direction {
                Direction::Up => file.move_up(id),
                Direction::Down => file.move_down(id),
            }
            .with_context(|| format!("could not move '{name}'"))?;
            manager.save()?;
            println!("Moved {name} to position {}", position + 1);
            Ok(())
        }
        Commands::Profile { .. } | Commands::Config { .. } | Commands::RestoreDefault => {
            anyhow::bail!("command does not edit the loaded hosts file")
        }
    }
}

fn set_groups(manager: &mut HostsManager, target: &str, active: bool) -> Result<()> {
    let verb = if active { "Enabled" } else { "Disabled" };
    let file = manager.current_mut();
    if target.eq_ignore_ascii_case("all") {
        let count = file.set_all_groups_active(active);
        manager.save()?;
        println!("{verb} {count} group(s)");
        return Ok(());
    }
    let id = file
        .find(EntryKind::HostGroup, target)
        .with_context(|| format!("group '{target}' not found"))?;
    if active {
        file.activate(id);
    } else {
        file.deactivate(id);
    }
    manager.save()?;
    println!("{verb} group: {target}");
    Ok(())
}

fn cmd_profile(paths: HostmanPaths, hosts_path: PathBuf, cmd: ProfileCmd) -> Result<()> {
    let source = crate::platform::default_text_source();
    match cmd {
        ProfileCmd::List => {
            let manager = HostsManager::new(paths, hosts_path, source);
            let last = store::load_settings(manager.paths())?.last_profile;
            for profile in manager.list_profiles()? {
                let suffix = if last.as_deref() == Some(profile.name.as_str()) {
                    " (last used)"
                } else {
                    ""
                };
                match profile.modified {
                    Some(modified) => println!(
                        "{}\t{}{suffix}",
                        profile.name,
                        modified.format("%Y-%m-%d %H:%M")
                    ),
                    None => println!("{}{suffix}", profile.name),
                }
            }
            Ok(())
        }
        ProfileCmd::Save { name } => {
            let manager = HostsManager::open(paths, hosts_path, source)?;
            let path = manager.save_profile(&name)?;
            println!("Saved profile {name}: {}", path.display());
            Ok(())
        }
        ProfileCmd::Load { name } => {
            let mut manager = HostsManager::new(paths, hosts_path, source);
            manager.use_profile(&name)?;
            store::remember_profile(manager.paths(), Some(&name))?;
            println!("Loaded profile {name} into {}", manager.hosts_path().display());
            Ok(())
        }
        ProfileCmd::Show { name, json } => {
            let manager = HostsManager::new(paths, hosts_path, source);
            let file = manager.load_profile(&name)?;
            print_tree(&file, json)
        }
        ProfileCmd::Delete { name } => {
            let manager = HostsManager::new(paths, hosts_path, source);
            if !manager.delete_profile(&name)? {
                anyhow::bail!("profile '{name}' does not exist");
            }
            let settings = store::load_settings(manager.paths())?;
            if settings.last_profile.as_deref() == Some(name.as_str()) {
                store::remember_profile(manager.paths(), None)?;
            }
            println!("Deleted profile: {name}");
            Ok(())
        }
    }
}

fn cmd_config(paths: &HostmanPaths, flag_given: bool, hosts_path: PathBuf, cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Show => {
            let settings = store::load_settings(paths)?;
            println!("data dir: {}", paths.config_dir.display());
            println!("profiles: {}", paths.profiles_dir.display());
            println!("hosts file: {}", hosts_path.display());
            if let Some(last) = settings.last_profile {
                println!("last profile: {last}");
            }
            Ok(())
        }
        ConfigCmd::SetHostsFile { path } => {
            if flag_given {
                tracing::warn!("--hosts-file does not change the remembered hosts file");
            }
            store::ensure_dirs(paths)?;
            let mut settings = store::load_settings(paths)?;
            settings.hosts_file = Some(path.clone());
            store::save_settings(paths, &settings)?;
            println!("Hosts file set to {}", path.display());
            Ok(())
        }
        ConfigCmd::ResetHostsFile => {
            let mut settings = store::load_settings(paths)?;
            settings.hosts_file = None;
            store::save_settings(paths, &settings)?;
            println!("Hosts file reset to default");
            Ok(())
        }
    }
}

/// Group by name, then host by address, then host by domain.
fn find_activatable(file: &HostFile, name: &str) -> Option<EntryId> {
    file.find(EntryKind::HostGroup, name)
        .or_else(|| file.find(EntryKind::Host, name))
        .or_else(|| file.find_host_by_domain(name))
}

fn find_entry(file: &HostFile, name: &str) -> Option<EntryId> {
    find_activatable(file, name).or_else(|| file.find(EntryKind::Comment, name))
}

/// Like [`find_entry`], but a domain name selects just that domain unless it
/// is the last one of its host.
fn find_removable(file: &HostFile, name: &str) -> Option<EntryId> {
    let by_name = file
        .find(EntryKind::HostGroup, name)
        .or_else(|| file.find(EntryKind::Host, name))
        .or_else(|| file.find(EntryKind::Comment, name));
    if by_name.is_some() {
        return by_name;
    }
    let domain = file.find(EntryKind::Domain, name)?;
    let host = file.get(domain)?.parent()?;
    if file.domains(host).len() > 1 {
        Some(domain)
    } else {
        Some(host)
    }
}

fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Comment => "comment",
        EntryKind::HostGroup => "group",
        EntryKind::Host => "host",
        EntryKind::Domain => "domain",
    }
}

fn state_label(file: &HostFile, id: EntryId) -> &'static str {
    match file.is_active(id) {
        Some(true) => "active",
        _ => "inactive",
    }
}

fn print_tree(file: &HostFile, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&file.snapshot())?);
    } else {
        print!("{}", render_tree(file));
    }
    Ok(())
}

/// Human-readable tree: `[x]` active, `[ ]` inactive, `[~]` partly active.
pub fn render_tree(file: &HostFile) -> String {
    let mut out = String::new();
    if file.exclusive_group_toggle_mode() {
        out.push_str("(exclusive group toggle mode)\n");
    }
    if file.exclusive_host_toggle_mode() {
        out.push_str("(exclusive host toggle mode)\n");
    }
    for id in file.top_level() {
        render_entry(file, *id, 0, &mut out);
    }
    out
}

fn render_entry(file: &HostFile, id: EntryId, depth: usize, out: &mut String) {
    let Some(entry) = file.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    match entry.kind() {
        EntryKind::Comment => {
            for line in entry.name().lines() {
                out.push_str(&format!("{indent}# {line}\n"));
            }
        }
        EntryKind::HostGroup => {
            let rate = file.active_rate(id).unwrap_or(0.0);
            out.push_str(&format!(
                "{indent}{} {} ({:.0}%)",
                marker(file, id),
                entry.name(),
                rate * 100.0
            ));
            push_description(entry, out);
            for child in entry.children() {
                render_entry(file, *child, depth + 1, out);
            }
        }
        EntryKind::Host => {
            out.push_str(&format!(
                "{indent}{} {}\t{}",
                marker(file, id),
                entry.name(),
                file.domains(id).join(" ")
            ));
            push_description(entry, out);
        }
        EntryKind::Domain => {}
    }
}

fn push_description(entry: &HostsEntry, out: &mut String) {
    if let Some(description) = entry.description() {
        out.push_str(&format!("  # {description}"));
    }
    out.push('\n');
}

fn marker(file: &HostFile, id: EntryId) -> &'static str {
    match file.active_rate(id) {
        Some(rate) if rate >= 1.0 => "[x]",
        Some(rate) if rate > 0.0 => "[~]",
        _ => "[ ]",
    }
}
