//! Argument-vector builder for the `op` tool.
//!
//! Each call appends to the vector in order. Optional flags given an empty
//! value are left out so the tool applies its own defaults. Nothing here is
//! validated; callers are responsible for passing a meaningful command.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpCommand {
    args: Vec<String>,
}

impl OpCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    fn push(mut self, arg: &str) -> Self {
        self.args.push(arg.to_owned());
        self
    }

    fn flag(self, name: &str, value: &str) -> Self {
        self.push(name).push(value)
    }

    fn optional_flag(self, name: &str, value: &str) -> Self {
        if value.is_empty() {
            return self;
        }
        self.flag(name, value)
    }

    pub fn user(self) -> Self {
        self.push("user")
    }

    pub fn group(self) -> Self {
        self.push("group")
    }

    pub fn vault(self) -> Self {
        self.push("vault")
    }

    pub fn create(self) -> Self {
        self.push("create")
    }

    pub fn provision(self) -> Self {
        self.push("provision")
    }

    pub fn get(self) -> Self {
        self.push("get")
    }

    pub fn list(self) -> Self {
        self.push("list")
    }

    pub fn edit(self) -> Self {
        self.push("edit")
    }

    pub fn delete(self) -> Self {
        self.push("delete")
    }

    pub fn grant(self) -> Self {
        self.push("grant")
    }

    pub fn revoke(self) -> Self {
        self.push("revoke")
    }

    pub fn raw(self, value: &str) -> Self {
        self.push(value)
    }

    pub fn name_flag(self, name: &str) -> Self {
        self.flag("--name", name)
    }

    pub fn email_flag(self, email: &str) -> Self {
        self.flag("--email", email)
    }

    pub fn description_flag(self, description: &str) -> Self {
        self.optional_flag("--description", description)
    }

    pub fn role_flag(self, role: &str) -> Self {
        self.optional_flag("--role", role)
    }

    pub fn group_flag(self, id: &str) -> Self {
        self.flag("--group", id)
    }

    pub fn user_flag(self, id: &str) -> Self {
        self.flag("--user", id)
    }

    pub fn vault_flag(self, id: &str) -> Self {
        self.flag("--vault", id)
    }

    pub fn no_input_flag(self) -> Self {
        self.push("--no-input")
    }

    pub fn format_json_flag(self) -> Self {
        self.flag("--format", "json")
    }

    /// Joined with commas in the order given; omitted when empty.
    pub fn permissions_flag(self, permissions: &[&str]) -> Self {
        if permissions.is_empty() {
            return self;
        }
        let joined = permissions.join(",");
        self.flag("--permissions", &joined)
    }
}
