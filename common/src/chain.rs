//! カード連鎖（タイムライン表示）のモデル
//!
//! 並び順のレコード列を左から右へ等間隔のカード列にし、
//! 隣り合うカードを i → i+1 の向きでつなぐ。
//!
//! - ドラッグによる移動は見た目だけで、並び順やリンクには影響しない
//! - 入力が変わるたびに全体を作り直し、手動の配置は破棄する
//! - ユーザーがリンクを追加する手段はない

use crate::geometry::{Point, Rect, Size, Vector};
use crate::types::Record;

/// カード幅
pub const NODE_WIDTH: f32 = 200.0;
/// カード高さ
pub const NODE_HEIGHT: f32 = 160.0;
/// カード間の横方向の隙間
pub const NODE_GAP: f32 = 40.0;
/// カードを並べる行のY座標
pub const ROW_Y: f32 = 60.0;

pub const NODE_SIZE: Size = Size::new(NODE_WIDTH, NODE_HEIGHT);

/// 1枚のカード
#[derive(Debug, Clone, PartialEq)]
pub struct ChainNode {
    /// 並び順のインデックス
    pub id: usize,
    pub record: Record,
    /// 左上のワールド座標
    pub position: Point,
}

impl ChainNode {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, NODE_SIZE)
    }

    /// 入力側の接続点（左辺中央）
    pub fn input_port(&self) -> Point {
        Point::new(self.position.x, self.position.y + NODE_HEIGHT / 2.0)
    }

    /// 出力側の接続点（右辺中央）
    pub fn output_port(&self) -> Point {
        Point::new(self.position.x + NODE_WIDTH, self.position.y + NODE_HEIGHT / 2.0)
    }

    pub fn has_image(&self) -> bool {
        !self.record.image_url.is_empty()
    }
}

/// 向き付きのリンク（source → target）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEdge {
    pub id: String,
    pub source: usize,
    pub target: usize,
}

/// カード列とリンク
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chain {
    nodes: Vec<ChainNode>,
    edges: Vec<ChainEdge>,
    /// 作り直しのたびに増える世代番号
    generation: u64,
}

/// インデックスに対応する既定の配置
pub fn default_position(index: usize) -> Point {
    Point::new(index as f32 * (NODE_WIDTH + NODE_GAP), ROW_Y)
}

fn layout(items: &[Record]) -> (Vec<ChainNode>, Vec<ChainEdge>) {
    let nodes = items
        .iter()
        .enumerate()
        .map(|(i, record)| ChainNode {
            id: i,
            record: record.clone(),
            position: default_position(i),
        })
        .collect();

    let edges = (1..items.len())
        .map(|target| {
            let source = target - 1;
            ChainEdge {
                id: format!("e{}-{}", source, target),
                source,
                target,
            }
        })
        .collect();

    (nodes, edges)
}

impl Chain {
    /// レコード列から既定配置のカード列を作る
    pub fn build(items: &[Record]) -> Self {
        let (nodes, edges) = layout(items);
        Self {
            nodes,
            edges,
            generation: 0,
        }
    }

    /// 入力の変更に合わせて全体を作り直す（手動配置は破棄）
    pub fn rebuild(&mut self, items: &[Record]) {
        let (nodes, edges) = layout(items);
        self.nodes = nodes;
        self.edges = edges;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ChainEdge] {
        &self.edges
    }

    pub fn node(&self, id: usize) -> Option<&ChainNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// カードを相対移動（存在しなければ false）
    pub fn move_node(&mut self, id: usize, delta: Vector) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = node.position + delta;
                true
            }
            None => false,
        }
    }

    /// カードの位置を直接指定（存在しなければ false）
    pub fn set_position(&mut self, id: usize, position: Point) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// 全カードを囲む矩形
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(ChainNode::rect)
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// ワールド座標の点にあるカード（重なりは後ろのカードが手前）
    pub fn node_at(&self, point: Point) -> Option<usize> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.rect().contains(point))
            .map(|node| node.id)
    }

    /// リンクの経路（水平 → 垂直 → 水平の階段状）
    pub fn edge_route(&self, edge: &ChainEdge) -> Option<[Point; 4]> {
        let start = self.node(edge.source)?.output_port();
        let end = self.node(edge.target)?.input_port();
        let mid_x = (start.x + end.x) / 2.0;
        Some([
            start,
            Point::new(mid_x, start.y),
            Point::new(mid_x, end.y),
            end,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                title: format!("t{}", i),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_empty_chain_has_no_cards_or_links() {
        let chain = Chain::build(&[]);
        assert!(chain.is_empty());
        assert!(chain.edges().is_empty());
        assert!(chain.bounds().is_none());
    }

    #[test]
    fn test_single_card_has_no_links() {
        let chain = Chain::build(&items(1));
        assert_eq!(chain.len(), 1);
        assert!(chain.edges().is_empty());
    }

    #[test]
    fn test_links_connect_consecutive_cards() {
        let chain = Chain::build(&items(4));
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.edges().len(), 3);
        for (i, edge) in chain.edges().iter().enumerate() {
            assert_eq!(edge.source, i);
            assert_eq!(edge.target, i + 1);
            assert_eq!(edge.id, format!("e{}-{}", i, i + 1));
        }
    }

    #[test]
    fn test_default_layout_left_to_right() {
        let chain = Chain::build(&items(3));
        let xs: Vec<f32> = chain.nodes().iter().map(|n| n.position.x).collect();
        assert_eq!(xs, vec![0.0, 240.0, 480.0]);
        assert!(chain.nodes().iter().all(|n| n.position.y == ROW_Y));
        assert_eq!(chain.nodes()[2].record.title, "t2");
    }

    #[test]
    fn test_drag_moves_only_position() {
        let mut chain = Chain::build(&items(3));
        let edges_before = chain.edges().to_vec();

        assert!(chain.move_node(1, Vector::new(10.0, -20.0)));
        assert_eq!(chain.node(1).unwrap().position, Point::new(250.0, 40.0));
        assert_eq!(chain.edges(), edges_before.as_slice());
        assert_eq!(chain.node(1).unwrap().record.title, "t1");

        assert!(!chain.move_node(99, Vector::new(1.0, 1.0)));
        assert!(chain.set_position(0, Point::new(-5.0, 5.0)));
        assert_eq!(chain.node(0).unwrap().position, Point::new(-5.0, 5.0));
    }

    #[test]
    fn test_rebuild_discards_manual_positions() {
        let mut chain = Chain::build(&items(2));
        chain.move_node(0, Vector::new(300.0, 300.0));

        chain.rebuild(&items(3));
        assert_eq!(chain.generation(), 1);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.edges().len(), 2);
        assert_eq!(chain.node(0).unwrap().position, default_position(0));
    }

    #[test]
    fn test_bounds_and_hit_test() {
        let chain = Chain::build(&items(2));
        let bounds = chain.bounds().unwrap();
        assert_eq!(bounds.min, Point::new(0.0, ROW_Y));
        assert_eq!(bounds.max, Point::new(440.0, ROW_Y + NODE_HEIGHT));

        assert_eq!(chain.node_at(Point::new(10.0, ROW_Y + 10.0)), Some(0));
        assert_eq!(chain.node_at(Point::new(250.0, ROW_Y + 10.0)), Some(1));
        assert_eq!(chain.node_at(Point::new(220.0, ROW_Y + 10.0)), None);
    }

    #[test]
    fn test_edge_route_connects_ports() {
        let chain = Chain::build(&items(2));
        let route = chain.edge_route(&chain.edges()[0]).unwrap();
        let mid_y = ROW_Y + NODE_HEIGHT / 2.0;
        assert_eq!(route[0], Point::new(200.0, mid_y));
        assert_eq!(route[1], Point::new(220.0, mid_y));
        assert_eq!(route[2], Point::new(220.0, mid_y));
        assert_eq!(route[3], Point::new(240.0, mid_y));
    }
}
