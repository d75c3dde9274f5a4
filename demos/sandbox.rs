//! Interactive sandbox: labels in a vertical list, rectangles in a grid,
//! buttons and a roto list driving the layout.
//!
//! Run with `cargo run --example sandbox`. Tab/arrows move the selection,
//! Enter/Space presses, Left/Right cycles the roto list, Ctrl+C quits.

use std::cell::RefCell;
use std::rc::Rc;

use weft_tui::{
    Button, Container, ElementGrid, ElementList, Hub, Label, Layoutable, Rectangle, RotoItem,
    RotoList, TextElement, UiError,
};

fn main() -> Result<(), UiError> {
    let mut hub = Hub::register(80, 25)?;
    hub.set_title("weft-tui sandbox")?;

    let list = Rc::new(RefCell::new(ElementList::new(30, 10, false)));

    let hello = Rc::new(RefCell::new(Label::new(0, 0, "Hellooo")));
    let world = Rc::new(RefCell::new(Label::new(0, 0, "World")));
    let bang = Rc::new(RefCell::new(Label::new(0, 0, "!!")));
    let readout = Rc::new(RefCell::new(Label::sized(20, 0, 50, 1)));
    let status = Rc::new(RefCell::new(Label::sized(0, 0, 10, 1)));

    {
        let mut list = list.borrow_mut();
        list.add_child(hello.clone());
        list.add_child(world.clone());
        list.add_child(bang.clone());
        list.reorder();
    }

    let mut grid = ElementGrid::new(60, 2, 2, 2)?;
    let boxes = [
        Rc::new(RefCell::new(Rectangle::new(0, 0, 3, 2)?)),
        Rc::new(RefCell::new(Rectangle::new(0, 0, 1, 3)?)),
        Rc::new(RefCell::new(Rectangle::new(0, 0, 1, 1)?)),
        Rc::new(RefCell::new(Rectangle::new(0, 0, 1, 1)?)),
    ];
    boxes[0].borrow_mut().set_filler('#');
    boxes[1].borrow_mut().set_filler('-');
    boxes[3].borrow_mut().set_filler('0');
    for rectangle in &boxes {
        grid.add_child(rectangle.clone());
    }
    grid.reorder();

    let button_one = Rc::new(RefCell::new(Button::new(10, 5, 20, 4, "Button 1")?));
    {
        let status = status.clone();
        let list = list.clone();
        button_one.borrow_mut().on_pressed(move || {
            status.borrow_mut().set_text("Pressed B1");
            let horizontal = list.borrow().horizontal();
            list.borrow_mut().set_horizontal(!horizontal);
        });
    }

    let button_two = Rc::new(RefCell::new(Button::new(10, 10, 20, 4, "Button 2")?));
    {
        let status = status.clone();
        let list = list.clone();
        button_two.borrow_mut().on_pressed(move || {
            status.borrow_mut().set_text("Pressed B2");
            let x = list.borrow().x();
            list.borrow_mut().set_x(30 + (x + 1) % 10);
        });
    }

    let roto = Rc::new(RefCell::new(RotoList::<i32>::new(0, 15, 20, 1)?));
    {
        let status = status.clone();
        let list = list.clone();
        roto.borrow_mut().on_changed(move |item: &RotoItem<i32>| {
            status.borrow_mut().set_text(&format!("Switch {}", item.value()));
            list.borrow_mut().set_padding(*item.value());
        });
    }
    roto.borrow_mut().set_items(vec![
        RotoItem::new("One", 1),
        RotoItem::new("Two", 2),
        RotoItem::new("Three", 3),
        RotoItem::new("Pi", 4),
    ]);

    let view = hub.add_view("main")?;
    view.add_element(hello)?;
    view.add_element(world)?;
    view.add_element(bang)?;
    view.add_element(readout.clone())?;
    for rectangle in boxes {
        view.add_element(rectangle)?;
    }
    view.add_element(status)?;
    view.add_element(button_one)?;
    view.add_element(button_two)?;
    view.add_element(roto)?;

    let readout_hook = readout;
    hub.on_unhandled_key(move |event| {
        readout_hook
            .borrow_mut()
            .set_text(&format!("I: {:?}+{:?}", event.key.modifiers, event.key.code));
    });

    hub.run()
}
