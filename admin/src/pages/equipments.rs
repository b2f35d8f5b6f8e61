use gateway::Gateway;
use shared::Equipment;

use crate::app::AppContext;
use crate::entity::AdminEntity;

#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentCard {
    pub equipment: Equipment,
    pub image_url: String,
}

pub async fn load_equipments(gateway: &Gateway, ctx: &AppContext) -> Vec<EquipmentCard> {
    let _loading = ctx.loader.start();
    match gateway.equipments.get_all().await.into_data() {
        Some(items) => items
            .into_iter()
            .map(|equipment| EquipmentCard {
                image_url: gateway.images.public_url(&equipment.id),
                equipment,
            })
            .collect(),
        None => {
            ctx.notifier.error(Equipment::MESSAGES.load_list_failed);
            Vec::new()
        }
    }
}
