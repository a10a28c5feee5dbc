//! Categories command implementation
//!
//! Lists the taxonomy, or the members of one group.

use crate::redaction::taxonomy::{self, Group};
use clap::Args;

/// Arguments for the categories command
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Only list members of this group (pii, phi, pci)
    #[arg(short, long)]
    pub group: Option<Group>,
}

impl CategoriesArgs {
    /// Execute the categories command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        println!("{}", self.render());
        Ok(0)
    }

    fn render(&self) -> String {
        let mut output = String::new();

        match self.group {
            Some(group) => {
                output.push_str(&format!(
                    "{} - {} ({} categories)\n",
                    group.to_string().to_uppercase(),
                    group.description(),
                    group.member_names().len()
                ));
                for name in group.member_names() {
                    output.push_str(&format!("  {}\n", name.replace(' ', "_")));
                }
            }
            None => {
                output.push_str(&format!(
                    "📋 Available categories ({})\n\n",
                    taxonomy::ALL_CATEGORIES.len()
                ));
                for category in taxonomy::all_categories() {
                    let groups: Vec<String> = taxonomy::groups_of(category.as_str())
                        .iter()
                        .map(|g| g.to_string())
                        .collect();
                    let groups = if groups.is_empty() {
                        "-".to_string()
                    } else {
                        groups.join(", ")
                    };
                    output.push_str(&format!(
                        "  {:<36} {groups}\n",
                        category.as_str().replace(' ', "_")
                    ));
                }
                output.push_str("\nGroups:\n");
                for group in Group::ALL {
                    output.push_str(&format!(
                        "  --{group}  {} ({} categories)\n",
                        group.description(),
                        group.member_names().len()
                    ));
                }
            }
        }

        output
    }
}
