use crate::models::Service;

pub const SERVICES: [Service; 8] = [
    Service {
        id: 1,
        title: "Location Villa & Appartement",
        description: "Séjours de luxe dans des propriétés exclusives avec vues imprenables.",
        image_url: "https://picsum.photos/seed/villa/1920/1080",
    },
    Service {
        id: 2,
        title: "Location de Voiture",
        description: "Explorez le Maroc à votre rythme avec notre flotte de véhicules premium.",
        image_url: "https://picsum.photos/seed/car/1920/1080",
    },
    Service {
        id: 3,
        title: "Canyoning à Tafraout",
        description: "Aventure et adrénaline au cœur des canyons spectaculaires de l'Atlas.",
        image_url: "https://picsum.photos/seed/canyoning/1920/1080",
    },
    Service {
        id: 4,
        title: "Parapente à Aglou",
        description: "Survolez la côte atlantique et admirez des paysages à couper le souffle.",
        image_url: "https://picsum.photos/seed/paragliding/1920/1080",
    },
    Service {
        id: 5,
        title: "Excursion en Quad",
        description: "Parcourez les dunes et les pistes désertiques pour une expérience intense.",
        image_url: "https://picsum.photos/seed/quad/1920/1080",
    },
    Service {
        id: 6,
        title: "Location de Vélo à Tafraout",
        description: "Découvrez les roches peintes et les villages berbères à VTT.",
        image_url: "https://picsum.photos/seed/bike/1920/1080",
    },
    Service {
        id: 7,
        title: "Surf à Taghazout/Aglou",
        description: "Domptez les vagues de spots de surf de renommée mondiale.",
        image_url: "https://picsum.photos/seed/surf/1920/1080",
    },
    Service {
        id: 8,
        title: "Soirées & Clubbing à Taghazout",
        description: "Accès VIP aux meilleures beach parties et soirées exclusives.",
        image_url: "https://picsum.photos/seed/party/1920/1080",
    },
];

pub fn services() -> &'static [Service] {
    &SERVICES
}

pub fn find_service(id: u32) -> Option<&'static Service> {
    SERVICES.iter().find(|service| service.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_resolvable() {
        for service in services() {
            assert_eq!(find_service(service.id), Some(service));
        }
        assert!(find_service(99).is_none());
    }
}
