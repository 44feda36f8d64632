//! Template Engine
//!
//! Handles HTML template rendering using minijinja.

use minijinja::{Environment, Error as MiniJinjaError};

/// Template manager
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Create a new template manager
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Register templates
        env.add_template("base", include_str!("../templates/base.html"))
            .expect("Failed to add base template");
        env.add_template("login", include_str!("../templates/login.html"))
            .expect("Failed to add login template");
        env.add_template("dashboard", include_str!("../templates/dashboard.html"))
            .expect("Failed to add dashboard template");
        env.add_template("campaigns", include_str!("../templates/campaigns.html"))
            .expect("Failed to add campaigns template");
        env.add_template("leads", include_str!("../templates/leads.html"))
            .expect("Failed to add leads template");
        env.add_template("accounts", include_str!("../templates/accounts.html"))
            .expect("Failed to add accounts template");
        env.add_template("inbox", include_str!("../templates/inbox.html"))
            .expect("Failed to add inbox template");

        Self { env }
    }

    /// Render a template with context
    pub fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, MiniJinjaError> {
        let template = self.env.get_template(name)?;
        template.render(context)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}
