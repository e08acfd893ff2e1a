//! Tag CLI commands

use clap::Subcommand;

use crate::display::{format_tag_details, format_tag_list};
use crate::error::RunoraResult;
use crate::models::{Tag, TagPatch};
use crate::storage::DocumentStorage;
use crate::store::Store;

/// Tag subcommands
#[derive(Subcommand)]
pub enum TagCommands {
    /// List all tags
    List,

    /// Create a custom tag
    Add {
        /// Tag name
        name: String,
        /// Display colour (e.g., "#FF6B6B")
        #[arg(short, long, default_value = "#95A5A6")]
        color: String,
        /// Display icon
        #[arg(short, long, default_value = "🏷️")]
        icon: String,
    },

    /// Show tag details
    Show {
        /// Tag name or ID
        tag: String,
    },

    /// Edit a tag
    Edit {
        /// Tag name or ID
        tag: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New display label
        #[arg(short, long)]
        label: Option<String>,
        /// New colour
        #[arg(short, long)]
        color: Option<String>,
        /// New icon
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Delete a tag (it is removed from every expense)
    Delete {
        /// Tag name or ID
        tag: String,
    },
}

fn find_tag<S: DocumentStorage>(store: &Store<S>, ident: &str) -> RunoraResult<Tag> {
    store.resolve_tag(ident).cloned()
}

/// Handle a tag command
pub fn handle_tag_command<S: DocumentStorage>(
    store: &mut Store<S>,
    cmd: TagCommands,
) -> RunoraResult<()> {
    match cmd {
        TagCommands::List => {
            println!("{}", format_tag_list(store.document()));
        }

        TagCommands::Add { name, color, icon } => {
            let tag = store.add_tag(name, color, icon)?;
            println!("Created tag: {} {}", tag.icon, tag.name);
            println!("  ID: {}", tag.id);
        }

        TagCommands::Show { tag } => {
            let tag = find_tag(store, &tag)?;
            print!("{}", format_tag_details(store.document(), &tag));
        }

        TagCommands::Edit {
            tag,
            name,
            label,
            color,
            icon,
        } => {
            let existing = find_tag(store, &tag)?;
            let patch = TagPatch {
                name,
                label,
                color,
                icon,
            };
            if patch == TagPatch::default() {
                println!("Nothing to change.");
                return Ok(());
            }

            let updated = store.update_tag(&existing.id, &patch)?;
            println!("Updated tag: {}", updated.display_name());
        }

        TagCommands::Delete { tag } => {
            let existing = find_tag(store, &tag)?;
            let deletion = store.delete_tag(&existing.id)?;

            println!("Deleted tag: {}", deletion.tag.display_name());
            if deletion.references_removed > 0 {
                println!(
                    "  Removed from {} expense(s)",
                    deletion.references_removed
                );
            }
        }
    }

    Ok(())
}
