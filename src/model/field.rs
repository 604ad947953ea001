use std::fmt;

/// Which part of a resource ends up on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Password,
    Username,
    Url,
}

impl Field {
    /// Menu order
    pub const ALL: [Field; 3] = [Field::Password, Field::Username, Field::Url];

    /// Text offered in the attribute menu
    pub fn option(self) -> &'static str {
        match self {
            Field::Password => "password",
            Field::Username => "username",
            Field::Url => "url",
        }
    }

    /// Human name used in notifications
    pub fn label(self) -> &'static str {
        match self {
            Field::Password => "Password",
            Field::Username => "Username",
            Field::Url => "URL",
        }
    }

    pub fn from_option(option: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.option() == option)
    }

    pub fn options() -> Vec<String> {
        Field::ALL.iter().map(|f| f.option().to_owned()).collect()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
