use std::path::{Path, PathBuf};

use timeline_common::{Chain, Record, TimelineView, Viewport};

/// ドラッグ中の対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Node(usize),
    Pan,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: TimelineView,
    pub chain: Chain,
    pub viewport: Viewport,
    pub source_path: Option<PathBuf>,
    pub drag: Option<DragTarget>,
    /// 次の描画で全体表示に合わせる
    pub needs_fit: bool,
}

impl AppState {
    pub fn set_records(&mut self, records: Vec<Record>, source: Option<&Path>) {
        self.view.replace_records(records);
        self.source_path = source.map(Path::to_path_buf);
        self.rebuild_chain();
    }

    pub fn select_trait(&mut self, trait_name: String) {
        self.update_view(|view| view.select_trait(trait_name));
    }

    pub fn select_theme(&mut self, theme: String) {
        self.update_view(|view| view.select_theme(theme));
    }

    pub fn select_combination(&mut self, index: usize) {
        self.update_view(|view| {
            view.select_combination(index);
        });
    }

    /// 表示列が変わったときだけ作り直す
    fn update_view(&mut self, f: impl FnOnce(&mut TimelineView)) {
        let before = self.view.items().to_vec();
        f(&mut self.view);
        if self.view.items() != before.as_slice() {
            self.rebuild_chain();
        }
    }

    fn rebuild_chain(&mut self) {
        self.chain.rebuild(self.view.items());
        self.drag = None;
        self.needs_fit = true;
    }

    pub fn source_dir(&self) -> Option<&Path> {
        self.source_path.as_deref().and_then(Path::parent)
    }
}
