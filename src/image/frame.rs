//! 图片框的拖拽与缩放状态
//!
//! 每个图片框独立持有自己的位置和尺寸，不与其他组件共享。

/// 最小边长（像素）
pub const MIN_EDGE: f64 = 50.0;

/// 默认尺寸（像素）
pub const DEFAULT_EDGE: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE, DEFAULT_EDGE)
    }
}

/// 按下的控制柄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// 左上角移动柄
    Move,
    /// 右下角缩放柄
    Resize,
}

/// 当前交互
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Idle,
    /// 指针与图片左上角的偏移
    Dragging { grab: Point },
    /// 指针减去尺寸得到的锚点
    Resizing { anchor: Point },
}

/// 可拖拽、可缩放的图片框
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    position: Point,
    size: Size,
    interaction: Interaction,
}

impl ImageFrame {
    pub fn new(size: Size) -> Self {
        Self {
            position: Point::default(),
            size: clamp(size),
            interaction: Interaction::Idle,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_active(&self) -> bool {
        self.interaction != Interaction::Idle
    }

    /// 在控制柄上按下指针
    pub fn press(&mut self, handle: Handle, cursor: Point) {
        self.interaction = match handle {
            Handle::Move => Interaction::Dragging {
                grab: Point::new(cursor.x - self.position.x, cursor.y - self.position.y),
            },
            Handle::Resize => Interaction::Resizing {
                anchor: Point::new(cursor.x - self.size.width, cursor.y - self.size.height),
            },
        };
    }

    /// 指针移动；空闲时忽略
    pub fn move_to(&mut self, cursor: Point) {
        match self.interaction {
            Interaction::Idle => {}
            Interaction::Dragging { grab } => {
                self.position = Point::new(cursor.x - grab.x, cursor.y - grab.y);
            }
            Interaction::Resizing { anchor } => {
                self.size = clamp(Size::new(cursor.x - anchor.x, cursor.y - anchor.y));
            }
        }
    }

    /// 松开指针或指针离开图片框
    pub fn release(&mut self) {
        self.interaction = Interaction::Idle;
    }
}

impl Default for ImageFrame {
    fn default() -> Self {
        Self::new(Size::default())
    }
}

fn clamp(size: Size) -> Size {
    Size::new(size.width.max(MIN_EDGE), size.height.max(MIN_EDGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_moves_by_pointer_delta() {
        let mut frame = ImageFrame::default();
        frame.press(Handle::Move, Point::new(10.0, 10.0));
        frame.move_to(Point::new(40.0, 25.0));
        assert_eq!(frame.position(), Point::new(30.0, 15.0));
        assert_eq!(frame.size(), Size::default());

        frame.release();
        frame.move_to(Point::new(500.0, 500.0));
        assert_eq!(frame.position(), Point::new(30.0, 15.0));
    }

    #[test]
    fn test_resize_grows_and_clamps() {
        let mut frame = ImageFrame::default();
        frame.press(Handle::Resize, Point::new(200.0, 200.0));
        frame.move_to(Point::new(260.0, 230.0));
        assert_eq!(frame.size(), Size::new(260.0, 230.0));

        frame.move_to(Point::new(-100.0, 20.0));
        assert_eq!(frame.size(), Size::new(MIN_EDGE, MIN_EDGE));
        assert!(frame.is_active());

        frame.release();
        assert_eq!(frame.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_initial_size_is_clamped() {
        let frame = ImageFrame::new(Size::new(10.0, 300.0));
        assert_eq!(frame.size(), Size::new(MIN_EDGE, 300.0));
    }
}
