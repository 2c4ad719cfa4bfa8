use hal_core::{NestedProperty, Representer};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Serialize, Deserialize)]
struct Item {
    value: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Order {
    id: u32,
    #[serde(skip)]
    items: Vec<Item>,
}

fn orders() -> &'static Representer<Order> {
    static ORDERS: OnceLock<Representer<Order>> = OnceLock::new();
    ORDERS.get_or_init(|| {
        let items = Representer::<Item>::serde()
            .link("self", |i: &Item| format!("http://items/{}", i.value))
            .build()
            .expect("item representer");

        Representer::<Order>::serde()
            .nested(
                NestedProperty::collection(
                    "items",
                    Arc::new(items),
                    |o: &Order| o.items.as_slice(),
                    |o: &mut Order, items| o.items = items,
                )
                .embedded(),
            )
            .link("self", |o: &Order| format!("http://orders/{}", o.id))
            .build()
            .expect("order representer")
    })
}

fn main() {
    let order = Order {
        id: 1,
        items: vec![Item {
            value: "Beer".into(),
        }],
    };

    match orders().to_json_pretty(&order) {
        Ok(json) => {
            println!("Rendered order as HAL:\n{json}");
            match orders().from_json(&json) {
                Ok(parsed) => println!("Parsed it back: {parsed:?}"),
                Err(e) => eprintln!("Failed to parse HAL: {:?}", miette::Report::new(e)),
            }
        }
        Err(e) => {
            eprintln!("Failed to render HAL: {:?}", miette::Report::new(e));
        }
    }
}
