mod make_rectangle;
mod make_regular_polygon;

pub use make_rectangle::MakeRectangle;
pub use make_regular_polygon::MakeRegularPolygon;
