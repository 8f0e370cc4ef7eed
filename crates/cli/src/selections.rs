//! The choices the wizard asks about and the summary of what was picked.

use std::fmt::{Display, Formatter};
use std::path::Path;

use ekko_core::prompt::Choice;
use ekko_core::theme::Theme;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A fixed set of options with a config value and a display label.
pub trait Selectable: Copy + PartialEq + Sized + 'static {
    const ALL: &'static [Self];

    /// Identifier used in config files and as the prompt value.
    fn value(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|item| item.value() == value)
    }

    fn choices() -> Vec<Choice> {
        Self::ALL
            .iter()
            .map(|item| Choice::new(item.value(), item.label()))
            .collect()
    }
}

macro_rules! display_label {
    ($($kind:ty),+) => {
        $(
            impl Display for $kind {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    #[default]
    Next,
    TanstackStart,
}

impl Selectable for Framework {
    const ALL: &'static [Self] = &[Self::Next, Self::TanstackStart];

    fn value(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::TanstackStart => "tanstack-start",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Next => "Next.js",
            Self::TanstackStart => "TanStack Start",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Auth {
    #[default]
    None,
    Clerk,
    BetterAuth,
}

impl Selectable for Auth {
    const ALL: &'static [Self] = &[Self::None, Self::Clerk, Self::BetterAuth];

    fn value(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Clerk => "clerk",
            Self::BetterAuth => "better-auth",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Clerk => "Clerk",
            Self::BetterAuth => "Better Auth",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Database {
    #[default]
    None,
    Convex,
    Drizzle,
}

impl Selectable for Database {
    const ALL: &'static [Self] = &[Self::None, Self::Convex, Self::Drizzle];

    fn value(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Convex => "convex",
            Self::Drizzle => "drizzle",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Convex => "Convex",
            Self::Drizzle => "Drizzle",
        }
    }
}

/// Optional integrations, in the order the tooling prompt lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    TanstackQuery,
    TanstackForm,
    Shadcn,
    ReactEmail,
    Resend,
}

impl Tool {
    /// The tooling list, with related tools grouped under a header.
    pub fn grouped_choices() -> Vec<Choice> {
        let choice = |tool: Tool| Choice::new(tool.value(), tool.label());
        vec![
            Choice::group(
                "TanStack",
                vec![choice(Self::TanstackQuery), choice(Self::TanstackForm)],
            ),
            choice(Self::Shadcn),
            Choice::group("Email", vec![choice(Self::ReactEmail), choice(Self::Resend)]),
        ]
    }
}

impl Selectable for Tool {
    const ALL: &'static [Self] = &[
        Self::TanstackQuery,
        Self::TanstackForm,
        Self::Shadcn,
        Self::ReactEmail,
        Self::Resend,
    ];

    fn value(self) -> &'static str {
        match self {
            Self::TanstackQuery => "tanstack-query",
            Self::TanstackForm => "tanstack-form",
            Self::Shadcn => "shadcn",
            Self::ReactEmail => "react-email",
            Self::Resend => "resend",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::TanstackQuery => "TanStack Query",
            Self::TanstackForm => "TanStack Form",
            Self::Shadcn => "shadcn",
            Self::ReactEmail => "React Email",
            Self::Resend => "Resend",
        }
    }
}

/// Base color passed to shadcn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShadcnColor {
    #[default]
    Neutral,
    Gray,
    Zinc,
    Stone,
    Slate,
}

impl Selectable for ShadcnColor {
    const ALL: &'static [Self] = &[
        Self::Neutral,
        Self::Gray,
        Self::Zinc,
        Self::Stone,
        Self::Slate,
    ];

    fn value(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Gray => "gray",
            Self::Zinc => "zinc",
            Self::Stone => "stone",
            Self::Slate => "slate",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Gray => "Gray",
            Self::Zinc => "Zinc",
            Self::Stone => "Stone",
            Self::Slate => "Slate",
        }
    }
}

display_label!(Framework, Auth, Database, Tool, ShadcnColor);

/// Everything the wizard gathered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    pub project_name: String,
    pub framework: Framework,
    pub auth: Auth,
    pub database: Database,
    /// In list order.
    pub tooling: Vec<Tool>,
    /// Only set when shadcn is part of the tooling.
    pub shadcn_color: Option<ShadcnColor>,
}

impl Selections {
    pub fn uses(&self, tool: Tool) -> bool {
        self.tooling.contains(&tool)
    }

    /// One line per notable selection; "None" choices are left out.
    pub fn summary_items(&self) -> Vec<String> {
        let mut items = vec![self.project_name.clone(), self.framework.to_string()];

        if self.auth != Auth::None {
            items.push(self.auth.to_string());
        }
        if self.database != Database::None {
            items.push(self.database.to_string());
        }

        for tool in &self.tooling {
            let item = match (tool, self.shadcn_color) {
                (Tool::Shadcn, Some(color)) => format!("shadcn ({})", color.value()),
                _ => tool.to_string(),
            };
            items.push(item);
        }

        items
    }

    pub fn format_summary(&self, theme: &Theme) -> String {
        let items = self
            .summary_items()
            .iter()
            .map(|item| format!("  {} {item}", theme.accent("●")))
            .join("\n");

        format!("{}\n{items}\n", theme.bold("📋 Summary of selections:"))
    }
}

/// Normalizes a project name into a directory name.
///
/// The name is trimmed and lower-cased, spaces become dashes and only the
/// last path component is kept.
///
/// ```
/// use ekko_cli::selections::sanitize_project_name;
///
/// assert_eq!(sanitize_project_name("  My Cool App "), "my-cool-app");
/// assert_eq!(sanitize_project_name("../Sites/Demo"), "demo");
/// ```
pub fn sanitize_project_name(name: &str) -> String {
    let name = name.trim().to_lowercase().replace(' ', "-");

    Path::new(&name)
        .file_name()
        .map(|base| base.to_string_lossy().into_owned())
        .unwrap_or_default()
}
