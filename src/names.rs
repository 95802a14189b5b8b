//! Option names: a leaf descriptor can answer to any number of short and long names.

/// A single name as it appears on the command line, borrowed from the token being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Name<'a> {
    Long(&'a str),
    Short(char),
}

impl std::fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Name::Long(l) => write!(f, "--{l}"),
            Name::Short(s) => write!(f, "-{s}"),
        }
    }
}

/// Names a single leaf descriptor (`Regular`/`Flag`) is known by.
#[derive(Debug, Clone, Default)]
pub struct Names {
    short: Vec<char>,
    long: Vec<&'static str>,
}

impl Names {
    pub fn short(name: char) -> Self {
        Names { short: vec![name], long: Vec::new() }
    }

    pub fn long(name: &'static str) -> Self {
        Names { short: Vec::new(), long: vec![name] }
    }

    #[must_use]
    pub fn and_short(mut self, name: char) -> Self {
        self.short.push(name);
        self
    }

    #[must_use]
    pub fn and_long(mut self, name: &'static str) -> Self {
        self.long.push(name);
        self
    }

    pub fn matches(&self, name: Name<'_>) -> bool {
        match name {
            Name::Long(l) => self.long.iter().any(|x| *x == l),
            Name::Short(s) => self.short.iter().any(|x| *x == s),
        }
    }

    /// Label used to render `Missing expected flag …`: the first long name if there is one,
    /// otherwise the first short name.
    pub fn label(&self) -> String {
        if let Some(l) = self.long.first() {
            format!("--{l}")
        } else if let Some(s) = self.short.first() {
            format!("-{s}")
        } else {
            String::new()
        }
    }
}
