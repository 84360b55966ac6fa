use crate::moves::MoveRecord;

/// Linear undo/redo history.
///
/// `applied` holds the moves currently on the board, oldest first. `undone`
/// is a stack of moves taken back, the most recently undone on top. `log`
/// holds the text of the whole known line: the applied prefix followed by
/// whatever can still be redone. Making a fresh move from the middle of the
/// line throws the redo part away; there is no branching.
#[derive(Clone, Debug, Default)]
pub struct History {
    applied: Vec<MoveRecord>,
    undone: Vec<MoveRecord>,
    log: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.applied.clear();
        self.undone.clear();
        self.log.clear();
    }

    /// Append a brand-new move, dropping any redo suffix. Returns how many
    /// redoable moves were discarded.
    pub fn record(&mut self, rec: MoveRecord) -> usize {
        let discarded = self.undone.len();
        self.undone.clear();
        self.log.truncate(self.applied.len());
        self.log.push(rec.to_notation());
        self.applied.push(rec);
        discarded
    }

    /// Move the newest applied record onto the redo stack.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let rec = self.applied.pop()?;
        self.undone.push(rec);
        Some(rec)
    }

    /// Move the top of the redo stack back onto the applied list.
    pub fn redo(&mut self) -> Option<MoveRecord> {
        let rec = self.undone.pop()?;
        self.applied.push(rec);
        Some(rec)
    }

    pub fn applied(&self) -> &[MoveRecord] {
        &self.applied
    }

    pub fn undone(&self) -> &[MoveRecord] {
        &self.undone
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn current_index(&self) -> usize {
        self.applied.len()
    }

    pub fn total(&self) -> usize {
        self.log.len()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn last_applied(&self) -> Option<&MoveRecord> {
        self.applied.last()
    }
}
