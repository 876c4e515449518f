use sqlite::Value;

use super::{SqLiteEntity, WhereCondition};

/// Define a query to perform on database and return iterator of a defined entity.
///
/// Used as a parameter of [fetch][crate::sqlite::ConnectionExtensions::fetch].
pub trait Query {
    /// Entity type returned by the result cursor.
    type Entity: SqLiteEntity;

    /// Return the filters to apply to the query.
    fn filters(&self) -> WhereCondition;

    /// Return the definition of this query, ie the actual SQL this query performs.
    fn get_definition(&self, condition: &str) -> String;

    /// Return the values bound to the `?1` to `?n` placeholders written by the definition
    /// itself (ie: the assignments of an update), the filters placeholders are numbered after
    /// them.
    fn definition_parameters(&self) -> Vec<Value> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use sqlite::{Connection, Row, Value};

    use crate::sqlite::{
        ConnectionExtensions, HydrationError, Projection, SourceAlias, SqliteConnection,
    };

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Planet {
        name: String,
        moons: i64,
        discovered_by: Option<String>,
    }

    impl SqLiteEntity for Planet {
        fn hydrate(row: Row) -> Result<Self, HydrationError> {
            let moons = row.read::<i64, _>(1);
            if moons < 0 {
                return Err(HydrationError::InvalidData(format!(
                    "a planet can not have a negative number of moons, got {moons}"
                )));
            }

            Ok(Self {
                name: row.read::<&str, _>(0).to_string(),
                moons,
                discovered_by: row.read::<Option<&str>, _>(2).map(str::to_string),
            })
        }

        fn get_projection() -> Projection {
            Projection::from(&[
                ("name", "{:planet:}.name", "text"),
                ("moons", "{:planet:}.moons", "integer"),
                ("discovered_by", "{:planet:}.discovered_by", "text"),
            ])
        }
    }

    struct GetPlanetQuery {
        min_moons: Option<i64>,
    }

    impl GetPlanetQuery {
        fn all() -> Self {
            Self { min_moons: None }
        }

        fn with_at_least_moons(moons: i64) -> Self {
            Self {
                min_moons: Some(moons),
            }
        }
    }

    impl Query for GetPlanetQuery {
        type Entity = Planet;

        fn filters(&self) -> WhereCondition {
            match self.min_moons {
                Some(moons) => WhereCondition::new("p.moons >= ?*", vec![Value::Integer(moons)]),
                None => WhereCondition::default(),
            }
        }

        fn get_definition(&self, condition: &str) -> String {
            let aliases = SourceAlias::new(&[("{:planet:}", "p")]);
            let projection = Self::Entity::get_projection().expand(aliases);

            format!("select {projection} from planet as p where {condition} order by p.moons asc")
        }
    }

    struct UpdateDiscovererQuery {
        planet: String,
        discovered_by: String,
    }

    impl Query for UpdateDiscovererQuery {
        type Entity = Planet;

        fn filters(&self) -> WhereCondition {
            WhereCondition::new("name = ?*", vec![Value::String(self.planet.clone())])
        }

        fn get_definition(&self, condition: &str) -> String {
            let aliases = SourceAlias::new(&[("{:planet:}", "planet")]);
            let projection = Self::Entity::get_projection().expand(aliases);

            format!("update planet set discovered_by = ?1 where {condition} returning {projection}")
        }

        fn definition_parameters(&self) -> Vec<Value> {
            vec![Value::String(self.discovered_by.clone())]
        }
    }

    fn planets_database() -> SqliteConnection {
        let connection = Connection::open_thread_safe(":memory:").unwrap();
        connection
            .execute(
                r#"
                create table planet (name text not null primary key, moons integer not null, discovered_by text);
                insert into planet values ('Mars', 2, 'Asaph Hall'), ('Venus', 0, null), ('Jupiter', 95, 'Galileo');
                "#,
            )
            .unwrap();

        connection
    }

    #[test]
    fn fetch_every_entity_in_query_order() {
        let connection = planets_database();

        let planets: Vec<Planet> = connection.fetch_collection(GetPlanetQuery::all()).unwrap();

        assert_eq!(
            vec!["Venus", "Mars", "Jupiter"],
            planets.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(None, planets[0].discovered_by);
    }

    #[test]
    fn fetch_first_with_parameters() {
        let connection = planets_database();

        let planet = connection.fetch_first(GetPlanetQuery::with_at_least_moons(10)).unwrap();

        assert_eq!(
            Some(Planet {
                name: "Jupiter".to_string(),
                moons: 95,
                discovered_by: Some("Galileo".to_string()),
            }),
            planet
        );
    }

    #[test]
    fn fetch_first_returns_none_without_result() {
        let connection = planets_database();

        let planet = connection.fetch_first(GetPlanetQuery::with_at_least_moons(1000)).unwrap();

        assert_eq!(None, planet);
    }

    #[test]
    fn definition_parameters_are_bound_before_the_filters_ones() {
        let connection = planets_database();

        let planet = connection
            .fetch_first(UpdateDiscovererQuery {
                planet: "Venus".to_string(),
                discovered_by: "Galileo".to_string(),
            })
            .unwrap();

        assert_eq!(
            Some(Planet {
                name: "Venus".to_string(),
                moons: 0,
                discovered_by: Some("Galileo".to_string()),
            }),
            planet
        );
    }

    #[test]
    fn hydration_errors_are_reported() {
        let connection = planets_database();
        connection
            .execute("insert into planet values ('Broken', -1, null)")
            .unwrap();

        let error = connection
            .fetch_collection::<_, Vec<Planet>>(GetPlanetQuery::all())
            .expect_err("Hydrating a negative number of moons should fail");

        assert!(format!("{error:?}").contains("negative number of moons"));
    }
}
