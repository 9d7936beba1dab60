//! Argv tokenization and classification.
//!
//! This crate turns a raw argument vector into an ordered sequence of
//! recognized flags and positional values, checked against a caller-supplied
//! table of flag definitions. It decides *what* each token is (long flag,
//! bundled short flags, positional text) and leaves interpreting values
//! entirely to the caller.

pub mod table {
    /// A single recognized flag.
    ///
    /// `name` carries its leading dash(es) (`-a`, `--help`). A name with
    /// exactly one leading dash and one trailing character is eligible for
    /// bundling; every other name only matches as a whole token.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Definition {
        name: String,
        takes_value: bool,
    }

    impl Definition {
        /// A boolean flag, present or absent, never followed by a value.
        pub fn flag(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                takes_value: false,
            }
        }

        /// A flag that consumes a value, either inline (`-n5`) or from the
        /// next token (`-n 5`, `--stuff 5`).
        pub fn value_flag(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                takes_value: true,
            }
        }

        pub fn name(&self) -> &str {
            &self.name
        }

        pub fn takes_value(&self) -> bool {
            self.takes_value
        }

        /// A usable name is non-empty, dash-prefixed, and longer than its
        /// dash prefix.
        pub(crate) fn is_well_formed(&self) -> bool {
            match self.name.strip_prefix("--") {
                Some(rest) => !rest.is_empty(),
                None => match self.name.strip_prefix('-') {
                    Some(rest) => !rest.is_empty(),
                    None => false,
                },
            }
        }
    }

    /// Look up a definition by its full name.
    ///
    /// Tables are small, so this is a linear scan. If a name appears twice,
    /// the first entry wins.
    pub(crate) fn lookup<'d>(defs: &'d [Definition], name: &str) -> Option<&'d Definition> {
        defs.iter().find(|def| def.name == name)
    }
}

pub mod scan {
    use crate::table::{self, Definition};

    /// One classified unit of input.
    ///
    /// A flag entry references the matched [`Definition`]; a positional entry
    /// has no definition and always carries the token text as its value. All
    /// values are borrowed views into the scanned argv.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParsedArg<'a> {
        def: Option<&'a Definition>,
        value: Option<&'a str>,
    }

    impl<'a> ParsedArg<'a> {
        /// The matched definition, or `None` for a positional argument.
        pub fn definition(&self) -> Option<&'a Definition> {
            self.def
        }

        /// The matched flag name, or `None` for a positional argument.
        pub fn name(&self) -> Option<&'a str> {
            self.def.map(Definition::name)
        }

        pub fn is_positional(&self) -> bool {
            self.def.is_none()
        }

        pub fn has_value(&self) -> bool {
            self.value.is_some()
        }

        /// The flag's value or the positional token text.
        pub fn value(&self) -> Option<&'a str> {
            self.value
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum ParseError {
        /// The caller-supplied configuration is unusable; the token list was
        /// not touched.
        #[error("invalid parser configuration: {0}")]
        InvalidConfiguration(&'static str),

        /// A dash-prefixed token (or bundled character) matched no
        /// definition. `token_index` is the offending token's position in
        /// the scanned argv.
        #[error("unknown argument `{name}`")]
        UnknownArgument { name: String, token_index: usize },

        /// A value-taking flag had no following token to supply its value.
        #[error("missing value for `{name}`")]
        MissingValue { name: String, token_index: usize },

        #[error("expected at least {min} positional arguments, got {found}")]
        TooFewPositional { min: usize, found: usize },

        #[error("expected at most {max} positional arguments, got {found}")]
        TooManyPositional { max: usize, found: usize },

        /// The result sequence could not grow.
        #[error("out of memory growing the result sequence")]
        OutOfResources,
    }

    /// Classify `argv[1..]` into flags and positional arguments.
    ///
    /// `argv[0]` is the program name and is always skipped. The final count
    /// of positional arguments must land in `[min_positional,
    /// max_positional]`, checked only after the whole scan succeeds.
    ///
    /// With `defs` absent every token after the first is positional, dashes
    /// included. With `defs` present (even empty) a dash-shaped token must
    /// match a definition or the scan fails; it is never reclassified as
    /// positional.
    pub fn parse<'a>(
        argv: &'a [String],
        min_positional: usize,
        max_positional: usize,
        defs: Option<&'a [Definition]>,
    ) -> Result<Vec<ParsedArg<'a>>, ParseError> {
        if argv.is_empty() {
            return Err(ParseError::InvalidConfiguration(
                "argv must contain the program name",
            ));
        }
        if min_positional > max_positional {
            return Err(ParseError::InvalidConfiguration(
                "min_positional exceeds max_positional",
            ));
        }
        if let Some(defs) = defs {
            if defs.iter().any(|def| !def.is_well_formed()) {
                return Err(ParseError::InvalidConfiguration(
                    "malformed definition name",
                ));
            }
        }

        let mut parsed: Vec<ParsedArg<'a>> = Vec::new();
        let mut positionals = 0usize;

        let mut i = 1;
        while i < argv.len() {
            let tok = argv[i].as_str();

            match defs {
                Some(defs) if tok.starts_with("--") && tok.len() > 2 => {
                    let Some(def) = table::lookup(defs, tok) else {
                        return Err(ParseError::UnknownArgument {
                            name: tok.to_string(),
                            token_index: i,
                        });
                    };
                    if def.takes_value() {
                        let Some(value) = argv.get(i + 1) else {
                            return Err(ParseError::MissingValue {
                                name: tok.to_string(),
                                token_index: i,
                            });
                        };
                        push(&mut parsed, Some(def), Some(value.as_str()))?;
                        i += 2;
                    } else {
                        push(&mut parsed, Some(def), None)?;
                        i += 1;
                    }
                }
                Some(defs) if tok.starts_with('-') && tok.len() > 1 => {
                    i += scan_bundle(defs, argv, i, &mut parsed)?;
                }
                _ => {
                    push(&mut parsed, None, Some(tok))?;
                    positionals += 1;
                    i += 1;
                }
            }
        }

        if positionals < min_positional {
            return Err(ParseError::TooFewPositional {
                min: min_positional,
                found: positionals,
            });
        }
        if positionals > max_positional {
            return Err(ParseError::TooManyPositional {
                max: max_positional,
                found: positionals,
            });
        }

        tracing::debug!(
            entries = parsed.len(),
            positionals,
            "argv scan finished"
        );
        Ok(parsed)
    }

    /// Scan one single-dash token character by character.
    ///
    /// Each character resolves to its own `-<c>` definition. A value-taking
    /// match terminates the bundle: the rest of the token is the value if
    /// non-empty, otherwise the next token is consumed whole. Returns how
    /// many tokens were consumed (1 or 2).
    fn scan_bundle<'a>(
        defs: &'a [Definition],
        argv: &'a [String],
        i: usize,
        parsed: &mut Vec<ParsedArg<'a>>,
    ) -> Result<usize, ParseError> {
        let tok = argv[i].as_str();
        let mut name = String::with_capacity(2);

        // Skip the leading dash; the caller guarantees it is there.
        for (pos, ch) in tok.char_indices().skip(1) {
            name.clear();
            name.push('-');
            name.push(ch);

            let Some(def) = table::lookup(defs, &name) else {
                return Err(ParseError::UnknownArgument {
                    name: name.clone(),
                    token_index: i,
                });
            };

            if !def.takes_value() {
                push(parsed, Some(def), None)?;
                continue;
            }

            let rest = &tok[pos + ch.len_utf8()..];
            if !rest.is_empty() {
                tracing::trace!(flag = %name, value = rest, "inline bundle value");
                push(parsed, Some(def), Some(rest))?;
                return Ok(1);
            }
            let Some(value) = argv.get(i + 1) else {
                return Err(ParseError::MissingValue {
                    name: name.clone(),
                    token_index: i,
                });
            };
            push(parsed, Some(def), Some(value.as_str()))?;
            return Ok(2);
        }

        Ok(1)
    }

    fn push<'a>(
        parsed: &mut Vec<ParsedArg<'a>>,
        def: Option<&'a Definition>,
        value: Option<&'a str>,
    ) -> Result<(), ParseError> {
        parsed
            .try_reserve(1)
            .map_err(|_| ParseError::OutOfResources)?;
        parsed.push(ParsedArg { def, value });
        Ok(())
    }
}
