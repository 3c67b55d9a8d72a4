use services::RouteCatalog;

#[derive(Clone, Debug, PartialEq)]
pub struct RouteListItemVm {
    pub id: String,
    pub name: String,
    pub steps_label: String,
    pub distance_label: String,
}

#[must_use]
pub fn map_route_list(catalog: &RouteCatalog) -> Vec<RouteListItemVm> {
    catalog
        .list()
        .map(|(id, route)| RouteListItemVm {
            id: id.to_string(),
            name: route.name().to_string(),
            steps_label: format!("{} steps", route.len()),
            distance_label: format!("{}m total", route.total_distance()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_routes_are_listed_by_id() {
        let items = map_route_list(&RouteCatalog::builtin());
        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["hackathon-demo", "pune-gps", "short-demo", "square-walk"]);

        let short = &items[2];
        assert_eq!(short.steps_label, "5 steps");
        assert_eq!(short.distance_label, "23m total");
    }
}
