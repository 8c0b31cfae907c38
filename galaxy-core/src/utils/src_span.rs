use std::fmt::Display;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	pub fn from(start: impl TryInto<u32>, end: impl TryInto<u32>) -> Self {
		Self {
			start: start.try_into().unwrap_or(u32::MAX),
			end: end.try_into().unwrap_or(u32::MAX),
		}
	}

	pub fn point(at: u32) -> Self {
		Self { start: at, end: at }
	}

	pub fn len(&self) -> u32 {
		self.end.saturating_sub(self.start)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}
