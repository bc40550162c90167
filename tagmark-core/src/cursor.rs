/// Cursor over submitted text, addressed both as (row, col) and as a char
/// offset into the whole text.
///
/// Columns and offsets count chars, matching the offsets spans use.
#[derive(Debug, Clone)]
pub struct CursorState {
    /// Current cursor position (row, col)
    pub row: usize,
    pub col: usize,
    /// Char offset where each line starts
    line_starts: Vec<usize>,
    lines: Vec<String>,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            line_starts: vec![0],
            lines: vec![String::new()],
        }
    }

    /// Load content and compute line offsets
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.split('\n').map(String::from).collect();
        self.line_starts.clear();

        let mut start = 0;
        for line in &self.lines {
            self.line_starts.push(start);
            start += line.chars().count() + 1;
        }

        self.row = 0;
        self.col = 0;
    }

    /// Get current cursor position as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Char offset of the cursor
    pub fn offset(&self) -> usize {
        self.cursor_to_offset(self.row, self.col)
    }

    /// Convert (row, col) to char offset, clamping to the text
    pub fn cursor_to_offset(&self, row: usize, col: usize) -> usize {
        match self.line_starts.get(row) {
            Some(&start) => start + col.min(self.line_len(row)),
            None => self.end_offset(),
        }
    }

    /// Convert char offset to (row, col)
    pub fn offset_to_cursor(&self, offset: usize) -> (usize, usize) {
        for (i, &start) in self.line_starts.iter().enumerate().rev() {
            if offset >= start {
                return (i, (offset - start).min(self.line_len(i)));
            }
        }
        (0, 0)
    }

    /// Set cursor to char offset
    pub fn set_cursor_offset(&mut self, offset: usize) {
        let (row, col) = self.offset_to_cursor(offset);
        self.row = row;
        self.col = col;
    }

    /// Offset just past the last char
    pub fn end_offset(&self) -> usize {
        let last = self.lines.len().saturating_sub(1);
        self.line_starts.get(last).copied().unwrap_or(0) + self.line_len(last)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|s| s.as_str())
    }

    /// Char offset where line `index` starts
    pub fn line_start(&self, index: usize) -> Option<usize> {
        self.line_starts.get(index).copied()
    }

    fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map(|l| l.chars().count()).unwrap_or(0)
    }

    // Cursor movement methods

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_to_start(&mut self) {
        self.col = 0;
    }

    pub fn move_to_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    pub fn move_to_top(&mut self) {
        self.row = 0;
        self.col = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.row = self.lines.len().saturating_sub(1);
        self.col = 0;
    }

    pub fn move_word_forward(&mut self) {
        let chars: Vec<char> = match self.lines.get(self.row) {
            Some(line) => line.chars().collect(),
            None => return,
        };
        let mut col = self.col;

        while col < chars.len() && !chars[col].is_whitespace() {
            col += 1;
        }
        while col < chars.len() && chars[col].is_whitespace() {
            col += 1;
        }

        if col >= chars.len() && self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        } else {
            self.col = col;
        }
    }

    pub fn move_word_back(&mut self) {
        if self.col == 0 {
            if self.row > 0 {
                self.row -= 1;
                self.col = self.line_len(self.row);
            }
            return;
        }

        let chars: Vec<char> = match self.lines.get(self.row) {
            Some(line) => line.chars().collect(),
            None => return,
        };
        let mut col = self.col.min(chars.len());

        while col > 0 && chars[col - 1].is_whitespace() {
            col -= 1;
        }
        while col > 0 && !chars[col - 1].is_whitespace() {
            col -= 1;
        }

        self.col = col;
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}
