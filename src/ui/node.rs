//! src/ui/node.rs
//!
//! Layout tree rebuilt every frame: groups split their area with ratatui
//! constraints, leaves hand their slice to a panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Anything that can render itself into a rectangle of the frame.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

pub enum Node {
    Split {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node>,
    },
    Panel(Box<dyn Panel>),
}

impl Node {
    /// Render the subtree into `area`. Empty slices are skipped.
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        if area.is_empty() {
            return;
        }
        match self {
            Node::Split {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.iter().copied())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk);
                }
            }
            Node::Panel(panel) => panel.draw(f, area),
        }
    }
}

pub fn group(direction: Direction, constraints: Vec<Constraint>, children: Vec<Node>) -> Node {
    Node::Split {
        direction,
        constraints,
        children,
    }
}

pub fn panel<P: Panel + 'static>(panel: P) -> Node {
    Node::Panel(Box::new(panel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe(Rc<RefCell<Vec<Rect>>>);

    impl Panel for Probe {
        fn draw(&self, _f: &mut Frame<'_>, area: Rect) {
            self.0.borrow_mut().push(area);
        }
    }

    #[test]
    fn split_hands_each_panel_its_slice() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let root = group(
            Direction::Horizontal,
            vec![Constraint::Length(4), Constraint::Min(0)],
            vec![panel(Probe(seen.clone())), panel(Probe(seen.clone()))],
        );
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal.draw(|f| root.draw(f, f.area())).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.as_slice(), &[Rect::new(0, 0, 4, 3), Rect::new(4, 0, 6, 3)]);
    }
}
