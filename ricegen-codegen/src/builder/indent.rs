//! Indentation of generated C++.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// A number of spaces per level.
    Spaces(u8),
    Tab,
}

impl Indent {
    /// 4-space indentation, the default for generated C++.
    pub const CPP: Self = Self::Spaces(4);

    /// 2-space indentation.
    pub const COMPACT: Self = Self::Spaces(2);

    /// Append `level` levels of indentation to `buffer`.
    pub fn write(&self, buffer: &mut String, level: usize) {
        match *self {
            Self::Spaces(width) => {
                buffer.extend(std::iter::repeat_n(' ', usize::from(width) * level))
            }
            Self::Tab => buffer.extend(std::iter::repeat_n('\t', level)),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CPP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(indent: Indent, level: usize) -> String {
        let mut buffer = String::new();
        indent.write(&mut buffer, level);
        buffer
    }

    #[test]
    fn test_any_width() {
        assert_eq!(render(Indent::COMPACT, 2), "    ");
        assert_eq!(render(Indent::Spaces(3), 1), "   ");
        assert_eq!(render(Indent::Tab, 2), "\t\t");
        assert_eq!(render(Indent::CPP, 0), "");
    }

    #[test]
    fn test_default() {
        assert_eq!(Indent::default(), Indent::CPP);
    }
}
