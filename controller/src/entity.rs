// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, Table};

pub trait Entity {
    type Id;

    fn get_id(&self) -> Self::Id;

    /// Labeled values in display order
    fn get_data(&self) -> Vec<(String, String)> {
        Default::default()
    }

    /// Label used for the id row when rendered
    fn id_label(&self) -> &'static str {
        "ID"
    }
}

pub trait ToTable {
    fn to_table(&self) -> Table;
}

impl<I: ToString, E: Entity<Id = I>> ToTable for E {
    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row![self.id_label(), self.get_id()]);

        for (key, val) in self.get_data() {
            table.add_row(row![key, val]);
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

impl<K, V> ToTable for [(K, V)]
where
    K: ToString,
    V: ToString,
{
    fn to_table(&self) -> Table {
        let mut table = Table::new();

        for (key, val) in self {
            table.add_row(row![key, val]);
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Poster {
        id: i32,
    }

    impl Entity for Poster {
        type Id = i32;

        fn get_id(&self) -> Self::Id {
            self.id
        }

        fn get_data(&self) -> Vec<(String, String)> {
            vec![
                ("first".into(), "a".into()),
                ("second".into(), "b".into()),
            ]
        }
    }

    #[test]
    fn entity_table_keeps_order() {
        let rendered = Poster { id: 7 }.to_table().to_string();

        let id = rendered.find("ID").unwrap();
        let first = rendered.find("first").unwrap();
        let second = rendered.find("second").unwrap();

        assert!(id < first && first < second);
        assert!(rendered.contains('7'));
    }

    #[test]
    fn pairs_table() {
        let pairs = [("Total Users", 3), ("Total Ratings", 10)];
        let table = pairs[..].to_table();

        assert_eq!(table.len(), 2);
        assert!(table.to_string().contains("Total Ratings"));
    }
}
